//! Cropframe Core - rotate, scale and crop pipeline
//!
//! This crate provides the image transform and crop-extraction pipeline
//! behind the Cropframe editor: decoding a source image, rendering it into
//! a square working buffer under quarter-turn rotation and scaling, and
//! extracting a fixed-aspect crop for PNG export.
//!
//! # Example
//!
//! ```ignore
//! use cropframe_core::{CropRegion, RasterCanvas};
//!
//! let mut canvas = RasterCanvas::default();
//! canvas.load(&std::fs::read("photo.jpg")?)?;
//! canvas.rotate90();
//! canvas.zoom_in();
//! canvas.set_crop_region(CropRegion::new(0, 0, 500, 600));
//! let png = canvas.export_png()?;
//! ```

pub mod canvas;
pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod transform;

pub use canvas::{CanvasPhase, FrameSink, RasterCanvas};
pub use config::{ConfigError, EditorConfig};
pub use crop::{extract, AspectRatio, CropRegion, OutputBuffer};
pub use decode::{decode_image, DecodeError, SourceImage};
pub use encode::{encode_png, EncodeError, EXPORT_FILE_NAME};
pub use transform::{
    content_rect, letterbox, rotate90, scale_by, Rotation, ScaleOp, ScalePolicy, TransformState,
    WorkingBuffer,
};
