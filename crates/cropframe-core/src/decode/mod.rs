//! Source image decoding for Cropframe.
//!
//! This module provides functionality for:
//! - Decoding PNG and JPEG bytes into RGBA source images
//! - Applying EXIF orientation so the source is upright
//! - Rejecting images beyond a configurable pixel budget
//!
//! # Architecture
//!
//! Decoding is the only step that touches encoded bytes. Everything
//! downstream (canvas state, transform engine, crop extraction) operates
//! on [`SourceImage`] pixels only.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let source = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", source.width, source.height);
//! ```

mod source;
mod types;

pub use source::{decode_image, decode_image_with_limit, get_orientation, DEFAULT_MAX_SOURCE_PIXELS};
pub use types::{DecodeError, FilterType, Orientation, SourceImage, CHANNELS};
