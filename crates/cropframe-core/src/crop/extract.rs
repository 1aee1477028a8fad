//! Verbatim pixel-block extraction from the working buffer.

use crate::decode::CHANNELS;
use crate::transform::WorkingBuffer;

use super::region::CropRegion;

/// The extracted crop, ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl OutputBuffer {
    /// Get the RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }
}

/// Copy `region` out of `buffer` into a new output buffer at origin `(0, 0)`.
///
/// The region is clamped to the buffer first. No resampling or blending
/// happens: every output byte is a byte of the working buffer. The aspect
/// ratio is not checked here.
///
/// Returns `None` if the clamped region is empty.
pub fn extract(buffer: &WorkingBuffer, region: &CropRegion) -> Option<OutputBuffer> {
    let Some(rect) = region.clamp_to(buffer.dimension()) else {
        tracing::debug!(?region, "crop region outside working buffer");
        return None;
    };

    if rect.width != region.width || rect.height != region.height {
        tracing::warn!(?region, ?rect, "crop region clamped to working buffer");
    }

    let mut pixels = Vec::with_capacity(rect.width as usize * rect.height as usize * CHANNELS);

    // Copy pixel data row by row for efficiency
    for y in rect.y..rect.y + rect.height {
        pixels.extend_from_slice(buffer.span(rect.x, y, rect.width));
    }

    Some(OutputBuffer {
        width: rect.width,
        height: rect.height,
        pixels,
    })
}
