//! Crop rectangles in working-buffer pixel coordinates.

use serde::{Deserialize, Serialize};

/// Fixed width:height ratio a selection may be locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// The 5:6 portrait ratio used by the editor.
    pub const PORTRAIT_5_6: AspectRatio = AspectRatio {
        width: 5,
        height: 6,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Ratio as `width / height`.
    pub fn value(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Returns true if both terms are non-zero.
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::PORTRAIT_5_6
    }
}

/// A candidate crop rectangle as reported by the selection widget.
///
/// The origin is signed because a drag may start outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A non-empty rectangle fully inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink the region to `ratio`, keeping its origin.
    ///
    /// The longer dimension (relative to the ratio) is reduced; the other is
    /// kept. An invalid ratio returns the region unchanged.
    pub fn fit_aspect(&self, ratio: AspectRatio) -> CropRegion {
        if !ratio.is_valid() || self.is_empty() {
            return *self;
        }

        // Cross-multiplied to stay in integers: w/h vs rw/rh
        let lhs = self.width as u64 * ratio.height as u64;
        let rhs = self.height as u64 * ratio.width as u64;

        let (width, height) = if lhs > rhs {
            let width = (self.height as f64 * ratio.value()).round() as u32;
            (width.max(1), self.height)
        } else if lhs < rhs {
            let height = (self.width as f64 / ratio.value()).round() as u32;
            (self.width, height.max(1))
        } else {
            (self.width, self.height)
        };

        CropRegion { width, height, ..*self }
    }

    /// Intersect with the `[0, dimension) x [0, dimension)` buffer square.
    ///
    /// Returns `None` when nothing of the region lies inside the buffer.
    pub fn clamp_to(&self, dimension: u32) -> Option<PixelRect> {
        let dim = dimension as i64;
        let left = (self.x as i64).clamp(0, dim);
        let top = (self.y as i64).clamp(0, dim);
        let right = (self.x as i64 + self.width as i64).clamp(0, dim);
        let bottom = (self.y as i64 + self.height as i64).clamp(0, dim);

        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelRect {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_value() {
        assert!((AspectRatio::PORTRAIT_5_6.value() - 5.0 / 6.0).abs() < f64::EPSILON);
        assert!(!AspectRatio::new(0, 6).is_valid());
        assert_eq!(AspectRatio::default(), AspectRatio::PORTRAIT_5_6);
    }

    #[test]
    fn test_fit_aspect_too_wide() {
        let region = CropRegion::new(10, 20, 900, 600);
        let fitted = region.fit_aspect(AspectRatio::PORTRAIT_5_6);
        assert_eq!(fitted, CropRegion::new(10, 20, 500, 600));
    }

    #[test]
    fn test_fit_aspect_too_tall() {
        let region = CropRegion::new(0, 0, 500, 1000);
        let fitted = region.fit_aspect(AspectRatio::PORTRAIT_5_6);
        assert_eq!(fitted, CropRegion::new(0, 0, 500, 600));
    }

    #[test]
    fn test_fit_aspect_already_matching() {
        let region = CropRegion::new(3, 4, 250, 300);
        assert_eq!(region.fit_aspect(AspectRatio::PORTRAIT_5_6), region);
    }

    #[test]
    fn test_fit_aspect_invalid_ratio_is_noop() {
        let region = CropRegion::new(0, 0, 10, 10);
        assert_eq!(region.fit_aspect(AspectRatio::new(5, 0)), region);
    }

    #[test]
    fn test_clamp_inside() {
        let rect = CropRegion::new(2, 3, 4, 5).clamp_to(100).unwrap();
        assert_eq!(rect, PixelRect { x: 2, y: 3, width: 4, height: 5 });
    }

    #[test]
    fn test_clamp_overhanging_right_edge() {
        let rect = CropRegion::new(8, 0, 5, 5).clamp_to(10).unwrap();
        assert_eq!(rect, PixelRect { x: 8, y: 0, width: 2, height: 5 });
    }

    #[test]
    fn test_clamp_negative_origin() {
        let rect = CropRegion::new(-3, -1, 5, 4).clamp_to(10).unwrap();
        assert_eq!(rect, PixelRect { x: 0, y: 0, width: 2, height: 3 });
    }

    #[test]
    fn test_clamp_fully_outside() {
        assert!(CropRegion::new(10, 0, 5, 5).clamp_to(10).is_none());
        assert!(CropRegion::new(-10, 0, 5, 5).clamp_to(10).is_none());
        assert!(CropRegion::new(0, 0, 0, 5).clamp_to(10).is_none());
    }

    #[test]
    fn test_clamp_extreme_values() {
        let rect = CropRegion::new(i32::MAX, i32::MAX, u32::MAX, u32::MAX).clamp_to(10);
        assert!(rect.is_none());

        let rect = CropRegion::new(i32::MIN, i32::MIN, u32::MAX, u32::MAX).clamp_to(10).unwrap();
        assert_eq!(rect, PixelRect { x: 0, y: 0, width: 10, height: 10 });
    }
}
