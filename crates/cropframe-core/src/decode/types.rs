//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes per pixel in every raster handled by this crate (RGBA8).
pub const CHANNELS: usize = 4;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to zero pixels.
    #[error("Image has no pixels")]
    EmptyImage,

    /// The image exceeds the configured pixel budget.
    #[error("Image {width}x{height} exceeds the limit of {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },
}

/// Sampling filter used when the working buffer is rendered from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterType {
    /// Nearest neighbor sampling (fastest, blocky when zoomed in).
    Nearest,
    /// Bilinear interpolation (smooth, one resample per render).
    #[default]
    Bilinear,
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An immutable decoded source image with RGBA pixel data.
///
/// The transform engine only ever reads from it; every render replays
/// the current transform against these pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a SourceImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Get the RGBA value at `(x, y)`. Caller guarantees the coordinate is in range.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check that the pixel buffer holds exactly `width * height` RGBA pixels.
    pub fn has_consistent_len(&self) -> bool {
        self.pixels.len() as u64 == self.pixel_count() * CHANNELS as u64
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
    }

    #[test]
    fn test_source_image_pixel_lookup() {
        let pixels: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
        let img = SourceImage::new(2, 2, pixels);

        assert_eq!(img.pixel(0, 0), [0, 1, 2, 3]);
        assert_eq!(img.pixel(1, 1), [12, 13, 14, 15]);
        assert_eq!(img.pixel_count(), 4);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_has_consistent_len() {
        let img = SourceImage::new(2, 3, vec![0; 2 * 3 * 4]);
        assert!(img.has_consistent_len());

        let short = SourceImage {
            width: 2,
            height: 3,
            pixels: vec![0; 10],
        };
        assert!(!short.has_consistent_len());
    }

    #[test]
    fn test_source_image_empty() {
        let img = SourceImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_from_rgba_image() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]));
        let img = SourceImage::from_rgba_image(rgba);

        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.pixel(2, 1), [9, 8, 7, 255]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::TooLarge {
            width: 10,
            height: 20,
            limit: 100,
        };
        assert_eq!(err.to_string(), "Image 10x20 exceeds the limit of 100 pixels");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
