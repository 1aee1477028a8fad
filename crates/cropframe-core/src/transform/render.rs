//! Replay rendering of the source image into the working buffer.
//!
//! Every render starts from the original source and the full
//! [`TransformState`], so the buffer is never more than one resample away
//! from the source no matter how many operations came before.
//!
//! # Algorithm
//!
//! The render uses inverse mapping: for each destination pixel center we
//! undo the rotation about the frame center `c = long_length / 2`, then the
//! letterbox offset, then the scale:
//!
//! ```text
//! r      = (dst_x + 0.5 - c, dst_y + 0.5 - c)
//! r'     = r rotated counter-clockwise by `turns` quarter turns
//! frame  = c + r'
//! src    = (frame - offset) / scale
//! ```
//!
//! Quarter turns are exact coordinate swaps, never trigonometry, so a
//! rotated frame stays axis aligned and crop coordinates stay valid.
//!
//! # Half-pixel offsets
//!
//! Pixels are not split. When `(long - short) / 2` is not a whole number
//! the image lands on whole destination pixels starting at the floor of the
//! offset, and the leftover pixel of margin goes to the trailing edge. A
//! 3x4 image in a 4px frame fills columns 0..=2 and leaves column 3
//! transparent.

use crate::decode::{FilterType, SourceImage, CHANNELS};

use super::buffer::WorkingBuffer;
use super::state::TransformState;

/// Render `source` under `state` into a new buffer of side `dimension`.
pub fn render(
    source: &SourceImage,
    state: &TransformState,
    filter: FilterType,
    dimension: u32,
) -> WorkingBuffer {
    let mut target = WorkingBuffer::new(dimension);
    render_into(source, state, filter, &mut target);
    target
}

/// Render into an existing buffer, reusing its allocation.
///
/// The target is cleared first; pixels outside the image stay transparent.
pub fn render_into(
    source: &SourceImage,
    state: &TransformState,
    filter: FilterType,
    target: &mut WorkingBuffer,
) {
    let dimension = target.dimension();
    target.reset(dimension);

    if source.is_empty() || state.scale <= 0.0 {
        return;
    }

    let lb = state.letterbox();
    let center = lb.center();
    let turns = state.rotation.quarter_turns();
    let inv_scale = 1.0 / state.scale;
    let (src_w, src_h) = (source.width as f64, source.height as f64);

    let pixels = target.pixels_mut();

    for dst_y in 0..dimension {
        let ry = dst_y as f64 + 0.5 - center;
        let row_start = dst_y as usize * dimension as usize * CHANNELS;

        for dst_x in 0..dimension {
            let rx = dst_x as f64 + 0.5 - center;
            let (ux, uy) = unrotate(rx, ry, turns);

            let src_x = (center + ux - lb.offset_x) * inv_scale;
            let src_y = (center + uy - lb.offset_y) * inv_scale;

            if src_x < 0.0 || src_x >= src_w || src_y < 0.0 || src_y >= src_h {
                continue;
            }

            let pixel = match filter {
                FilterType::Nearest => sample_nearest(source, src_x, src_y),
                FilterType::Bilinear => sample_bilinear(source, src_x, src_y),
            };

            let idx = row_start + dst_x as usize * CHANNELS;
            pixels[idx..idx + CHANNELS].copy_from_slice(&pixel);
        }
    }
}

/// Undo `turns` clockwise quarter turns of a center-relative point.
///
/// Screen coordinates have y pointing down, so one clockwise turn maps
/// `(x, y)` to `(-y, x)` and its inverse maps `(x, y)` to `(y, -x)`.
#[inline]
fn unrotate(x: f64, y: f64, turns: u8) -> (f64, f64) {
    match turns % 4 {
        0 => (x, y),
        1 => (y, -x),
        2 => (-x, -y),
        _ => (-y, x),
    }
}

/// Sample the source pixel containing `(x, y)`.
#[inline]
fn sample_nearest(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let px = (x.floor() as u32).min(image.width - 1);
    let py = (y.floor() as u32).min(image.height - 1);
    image.pixel(px, py)
}

/// Sample with bilinear interpolation between the 4 nearest pixel centers.
///
/// Positions are clamped to the outermost pixel centers so the image edge
/// does not fade into the transparent letterbox. A position exactly on a
/// pixel center returns that pixel unchanged.
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;

    let cx = (x - 0.5).clamp(0.0, max_x);
    let cy = (y - 0.5).clamp(0.0, max_y);

    let x0 = cx.floor() as u32;
    let y0 = cy.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    let fx = cx - x0 as f64;
    let fy = cy - y0 as f64;

    if fx == 0.0 && fy == 0.0 {
        return image.pixel(x0, y0);
    }

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}
