//! Crop extraction from the working buffer.
//!
//! The selection widget reports rectangles in working-buffer pixels. The
//! extractor trusts the rectangle's shape, clamps it to the buffer and
//! copies the pixels verbatim, independent of how the buffer was produced.

mod extract;
mod region;

pub use extract::{extract, OutputBuffer};
pub use region::{AspectRatio, CropRegion, PixelRect};
