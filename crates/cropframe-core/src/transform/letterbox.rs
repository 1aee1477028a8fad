//! Centering a scaled image inside its square frame.
//!
//! The frame is a square of side `long_length` anchored at the working
//! buffer's top-left corner. The image sits on the frame's long axis at 0
//! and is offset by `(long - short) / 2` on the short axis, so its center
//! always coincides with the frame center.
//!
//! ```text
//!  long side = height             long side = width
//!  ┌───┬─────┬───┐                ┌─────────────┐
//!  │   │     │   │                │             │ offset y
//!  │ x │ img │   │                ├─────────────┤
//!  │   │     │   │                │     img     │
//!  │   │     │   │                ├─────────────┤
//!  └───┴─────┴───┘                └─────────────┘
//! ```

use serde::{Deserialize, Serialize};

use super::state::{LongSide, TransformState};

/// Placement of the unrotated image inside the square frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letterbox {
    pub long_side: LongSide,
    /// Frame side length.
    pub long_length: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub content_width: f64,
    pub content_height: f64,
}

impl Letterbox {
    /// Center of the square frame (both axes).
    #[inline]
    pub fn center(&self) -> f64 {
        self.long_length / 2.0
    }
}

/// Compute the letterbox placement of a `width x height` image at `scale`.
pub fn letterbox(width: u32, height: u32, scale: f64) -> Letterbox {
    let content_width = width as f64 * scale;
    let content_height = height as f64 * scale;

    if width > height {
        Letterbox {
            long_side: LongSide::Width,
            long_length: content_width,
            offset_x: 0.0,
            offset_y: (content_width - content_height) / 2.0,
            content_width,
            content_height,
        }
    } else {
        Letterbox {
            long_side: LongSide::Height,
            long_length: content_height,
            offset_x: (content_height - content_width) / 2.0,
            offset_y: 0.0,
            content_width,
            content_height,
        }
    }
}

/// Axis-aligned rectangle in working-buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bounding box of the visible image after rotation.
///
/// A quarter turn about the frame center keeps the image centered, so odd
/// turns simply swap both the offsets and the extents.
pub fn content_rect(state: &TransformState) -> ContentRect {
    let lb = state.letterbox();
    if state.rotation.swaps_dimensions() {
        ContentRect {
            x: lb.offset_y,
            y: lb.offset_x,
            width: lb.content_height,
            height: lb.content_width,
        }
    } else {
        ContentRect {
            x: lb.offset_x,
            y: lb.offset_y,
            width: lb.content_width,
            height: lb.content_height,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the image center coincides with the frame center.
        #[test]
        fn prop_centering_invariant(
            width in 1u32..=6000,
            height in 1u32..=6000,
            scale in 0.1f64..=5.0,
        ) {
            let lb = letterbox(width, height, scale);
            let center = lb.long_length / 2.0;
            let tolerance = 1e-9 * lb.long_length.max(1.0);

            prop_assert!((lb.offset_x + lb.content_width / 2.0 - center).abs() < tolerance);
            prop_assert!((lb.offset_y + lb.content_height / 2.0 - center).abs() < tolerance);
        }

        /// Property: the content always fits inside the frame.
        #[test]
        fn prop_content_within_frame(
            width in 1u32..=6000,
            height in 1u32..=6000,
            scale in 0.1f64..=5.0,
        ) {
            let lb = letterbox(width, height, scale);
            prop_assert!(lb.offset_x >= 0.0 && lb.offset_y >= 0.0);
            prop_assert!(lb.content_width <= lb.long_length);
            prop_assert!(lb.content_height <= lb.long_length);
        }
    }
}
