//! Export encoding for Cropframe.
//!
//! The crop output is handed to the host as PNG bytes together with a
//! fixed download name. Triggering the download itself is left to the host.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::encode::{encode_png, EXPORT_FILE_NAME};
//!
//! let pixels = vec![128u8; 50 * 60 * 4];
//! let png = encode_png(&pixels, 50, 60).unwrap();
//! std::fs::write(EXPORT_FILE_NAME, png).unwrap();
//! ```

mod png;

pub use png::{encode_output, encode_png, EncodeError, EXPORT_FILE_NAME};
