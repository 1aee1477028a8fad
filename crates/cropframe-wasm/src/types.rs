//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropframe types,
//! handling the conversion between Rust and JavaScript data representations.

use cropframe_core::OutputBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image handed to JavaScript, typically the extracted crop.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`, ready for `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsCropImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsCropImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4 for RGBA)
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsCropImage {
    pub(crate) fn from_output(output: &OutputBuffer) -> Self {
        Self {
            width: output.width,
            height: output.height,
            pixels: output.pixels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_output() {
        let output = OutputBuffer {
            width: 5,
            height: 6,
            pixels: vec![7u8; 5 * 6 * 4],
        };
        let img = JsCropImage::from_output(&output);

        assert_eq!(img.width(), 5);
        assert_eq!(img.height(), 6);
        assert_eq!(img.byte_length(), 120);
        assert_eq!(img.pixels(), output.pixels);
    }
}
