//! PNG encoding for export.
//!
//! The crop keeps its alpha channel, so the letterbox margins that end up
//! inside a selection stay transparent in the exported file.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::crop::OutputBuffer;
use crate::decode::CHANNELS;

/// File name the exported crop is offered under.
pub const EXPORT_FILE_NAME: &str = "croppedImg.png";

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero-sized image and
/// `EncodeError::InvalidPixelData` if `pixels` has the wrong length.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    tracing::debug!(width, height, bytes = buffer.len(), "encoded png");
    Ok(buffer)
}

/// Encode an extracted crop to PNG bytes.
pub fn encode_output(output: &OutputBuffer) -> Result<Vec<u8>, EncodeError> {
    encode_png(&output.pixels, output.width, output.height)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid RGBA input always encodes and decodes losslessly.
        #[test]
        fn prop_lossless(
            (width, height) in (1u32..=24, 1u32..=24),
            fill in any::<[u8; 4]>(),
        ) {
            let pixels: Vec<u8> = fill.iter().copied().cycle().take((width * height * 4) as usize).collect();
            let png = encode_png(&pixels, width, height).unwrap();

            let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
            prop_assert_eq!(decoded.into_raw(), pixels);
        }
    }
}
