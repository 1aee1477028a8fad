//! The square off-screen raster holding the currently visible pixels.

use crate::decode::CHANNELS;

/// Default side length of the working buffer in pixels.
pub const DEFAULT_CANVAS_DIMENSION: u32 = 1500;

/// A square RGBA raster of fixed dimension.
///
/// Pixels not covered by the image are fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingBuffer {
    dimension: u32,
    pixels: Vec<u8>,
}

impl WorkingBuffer {
    /// Create a fully transparent buffer of `dimension x dimension` pixels.
    pub fn new(dimension: u32) -> Self {
        Self {
            dimension,
            pixels: vec![0u8; Self::byte_len(dimension)],
        }
    }

    #[inline]
    fn byte_len(dimension: u32) -> usize {
        dimension as usize * dimension as usize * CHANNELS
    }

    /// Side length in pixels.
    #[inline]
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// RGBA pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Get the RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.dimension || y >= self.dimension {
            return None;
        }
        let idx = (y as usize * self.dimension as usize + x as usize) * CHANNELS;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Bytes of `width` pixels starting at `(x, y)`. Caller keeps the span in range.
    pub(crate) fn span(&self, x: u32, y: u32, width: u32) -> &[u8] {
        let start = (y as usize * self.dimension as usize + x as usize) * CHANNELS;
        &self.pixels[start..start + width as usize * CHANNELS]
    }

    /// Resize to `dimension` if needed and make every pixel transparent.
    pub(crate) fn reset(&mut self, dimension: u32) {
        self.dimension = dimension;
        self.pixels.clear();
        self.pixels.resize(Self::byte_len(dimension), 0);
    }
}
