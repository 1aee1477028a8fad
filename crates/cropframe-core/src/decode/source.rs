//! Source image decoding with EXIF orientation handling.
//!
//! The editor shows images the way a browser `<img>` would, so a JPEG
//! carrying an orientation tag is turned upright before it becomes the
//! source for any transform.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, SourceImage};

/// Default pixel budget for a source image (100 megapixels).
pub const DEFAULT_MAX_SOURCE_PIXELS: u64 = 100_000_000;

/// Decode PNG or JPEG bytes into an upright RGBA source image.
///
/// Uses [`DEFAULT_MAX_SOURCE_PIXELS`] as the size limit.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, `DecodeError::EmptyImage`
/// for zero-sized images and `DecodeError::TooLarge` when the limit is exceeded.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    decode_image_with_limit(bytes, DEFAULT_MAX_SOURCE_PIXELS)
}

/// Decode image bytes, rejecting images with more than `max_pixels` pixels.
///
/// Dimensions are read from the header first so oversized images are
/// rejected before any pixel memory is allocated.
pub fn decode_image_with_limit(bytes: &[u8], max_pixels: u64) -> Result<SourceImage, DecodeError> {
    let (width, height) = reader_for(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let pixel_count = width as u64 * height as u64;
    if pixel_count > max_pixels {
        return Err(DecodeError::TooLarge {
            width,
            height,
            limit: max_pixels,
        });
    }

    let img = reader_for(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let orientation = get_orientation(bytes);
    let upright = apply_orientation(img, orientation);

    tracing::debug!(
        width = upright.width(),
        height = upright.height(),
        ?orientation,
        "decoded source image"
    );

    Ok(SourceImage::from_rgba_image(upright.into_rgba8()))
}

/// Read the EXIF orientation tag from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn reader_for(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
