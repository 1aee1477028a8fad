//! Transform parameters relating the working buffer to the source image.
//!
//! A [`TransformState`] is a plain value: every rotate or scale produces a
//! new state derived from the previous one. Long side and long length are
//! never stored, they are recomputed from `(width, height, scale)` on
//! every call.

use serde::{Deserialize, Serialize};

use super::letterbox::{letterbox, Letterbox};

/// Quarter-turn rotation applied to the source, clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Number of clockwise quarter turns (0-3).
    #[inline]
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Rotation in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// The rotation after one more clockwise quarter turn.
    pub fn rotated_cw(self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + 1)
    }

    /// Returns true for 90° and 270°, where the content's axes are swapped.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        self.quarter_turns() % 2 == 1
    }
}

/// Which source axis is longer after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LongSide {
    Width,
    Height,
}

/// A single scale request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleOp {
    /// `new = current + delta`
    Add(f64),
    /// `new = current * factor`
    Multiply(f64),
}

impl ScaleOp {
    fn apply(self, scale: f64) -> f64 {
        match self {
            ScaleOp::Add(delta) => scale + delta,
            ScaleOp::Multiply(factor) => scale * factor,
        }
    }
}

/// How zoom steps combine with the current scale.
///
/// One policy is chosen per editor session and every zoom goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ScalePolicy {
    /// Zoom in adds `delta`, zoom out subtracts it.
    Additive { delta: f64 },
    /// Zoom in multiplies by `factor`, zoom out divides by it.
    Multiplicative { factor: f64 },
}

impl Default for ScalePolicy {
    fn default() -> Self {
        ScalePolicy::Additive { delta: 0.1 }
    }
}

impl ScalePolicy {
    /// Interpret a raw step under this policy (a delta or a factor).
    pub fn op(self, step: f64) -> ScaleOp {
        match self {
            ScalePolicy::Additive { .. } => ScaleOp::Add(step),
            ScalePolicy::Multiplicative { .. } => ScaleOp::Multiply(step),
        }
    }

    pub fn zoom_in(self) -> ScaleOp {
        match self {
            ScalePolicy::Additive { delta } => ScaleOp::Add(delta),
            ScalePolicy::Multiplicative { factor } => ScaleOp::Multiply(factor),
        }
    }

    pub fn zoom_out(self) -> ScaleOp {
        match self {
            ScalePolicy::Additive { delta } => ScaleOp::Add(-delta),
            ScalePolicy::Multiplicative { factor } => ScaleOp::Multiply(1.0 / factor),
        }
    }
}

/// Geometric state of the working buffer relative to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformState {
    /// Source width in pixels.
    pub source_width: u32,
    /// Source height in pixels.
    pub source_height: u32,
    /// Cumulative scale factor (always > 0).
    pub scale: f64,
    /// Cumulative clockwise rotation.
    pub rotation: Rotation,
}

impl TransformState {
    /// State right after loading a source: scale 1, no rotation.
    pub fn initial(source_width: u32, source_height: u32) -> Self {
        Self {
            source_width,
            source_height,
            scale: 1.0,
            rotation: Rotation::Deg0,
        }
    }

    /// The longer source axis. Square images report `Height`.
    pub fn long_side(&self) -> LongSide {
        self.letterbox().long_side
    }

    /// Side length of the square frame: the longer of `width*scale` and `height*scale`.
    pub fn long_length(&self) -> f64 {
        self.letterbox().long_length
    }

    /// Placement of the unrotated image inside the square frame.
    pub fn letterbox(&self) -> Letterbox {
        letterbox(self.source_width, self.source_height, self.scale)
    }
}

/// Rotate the working content by +90° about the frame center.
///
/// Scale is unchanged; four applications return to the original state.
pub fn rotate90(state: &TransformState) -> TransformState {
    TransformState {
        rotation: state.rotation.rotated_cw(),
        ..*state
    }
}

/// Apply a scale request, clamping the result to `min_scale`.
///
/// A non-finite result leaves the state untouched.
pub fn scale_by(state: &TransformState, op: ScaleOp, min_scale: f64) -> TransformState {
    let requested = op.apply(state.scale);

    if !requested.is_finite() {
        tracing::warn!(?op, scale = state.scale, "ignoring non-finite scale");
        return *state;
    }

    let scale = if requested < min_scale {
        tracing::warn!(requested, min_scale, "scale clamped to minimum");
        min_scale
    } else {
        requested
    };

    TransformState { scale, ..*state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = TransformState::initial(1000, 1200);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.rotation, Rotation::Deg0);
        assert_eq!(state.long_side(), LongSide::Height);
        assert_eq!(state.long_length(), 1200.0);
    }

    #[test]
    fn test_long_side_tie_is_height() {
        let state = TransformState::initial(500, 500);
        assert_eq!(state.long_side(), LongSide::Height);
    }

    #[test]
    fn test_long_length_follows_scale() {
        let state = TransformState::initial(800, 600);
        let scaled = scale_by(&state, ScaleOp::Multiply(2.0), 0.1);
        assert_eq!(scaled.long_side(), LongSide::Width);
        assert_eq!(scaled.long_length(), 1600.0);
    }

    #[test]
    fn test_rotate90_cycles() {
        let mut state = TransformState::initial(10, 20);
        let expected = [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270, Rotation::Deg0];
        for rotation in expected {
            state = rotate90(&state);
            assert_eq!(state.rotation, rotation);
            assert_eq!(state.scale, 1.0);
        }
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::Deg0.degrees(), 0);
        assert_eq!(Rotation::Deg270.degrees(), 270);
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        assert!(!Rotation::Deg0.swaps_dimensions());
        assert!(Rotation::Deg90.swaps_dimensions());
        assert!(!Rotation::Deg180.swaps_dimensions());
        assert!(Rotation::Deg270.swaps_dimensions());
    }

    #[test]
    fn test_additive_scale() {
        let state = TransformState::initial(100, 100);
        let up = scale_by(&state, ScaleOp::Add(0.1), 0.1);
        assert!((up.scale - 1.1).abs() < 1e-9);

        let down = scale_by(&up, ScaleOp::Add(-0.1), 0.1);
        assert!((down.scale - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_clamps_to_minimum() {
        let state = TransformState {
            scale: 0.15,
            ..TransformState::initial(100, 100)
        };
        let result = scale_by(&state, ScaleOp::Add(-0.1), 0.1);
        assert_eq!(result.scale, 0.1);

        let result = scale_by(&state, ScaleOp::Multiply(-3.0), 0.1);
        assert_eq!(result.scale, 0.1);
    }

    #[test]
    fn test_non_finite_scale_ignored() {
        let state = TransformState::initial(100, 100);
        assert_eq!(scale_by(&state, ScaleOp::Multiply(f64::INFINITY), 0.1), state);
        assert_eq!(scale_by(&state, ScaleOp::Add(f64::NAN), 0.1), state);
    }

    #[test]
    fn test_policy_ops() {
        let additive = ScalePolicy::Additive { delta: 0.1 };
        assert_eq!(additive.zoom_in(), ScaleOp::Add(0.1));
        assert_eq!(additive.zoom_out(), ScaleOp::Add(-0.1));
        assert_eq!(additive.op(0.5), ScaleOp::Add(0.5));

        let multiplicative = ScalePolicy::Multiplicative { factor: 2.0 };
        assert_eq!(multiplicative.zoom_in(), ScaleOp::Multiply(2.0));
        assert_eq!(multiplicative.zoom_out(), ScaleOp::Multiply(0.5));
    }

    #[test]
    fn test_default_policy_is_additive() {
        assert_eq!(ScalePolicy::default(), ScalePolicy::Additive { delta: 0.1 });
    }
}
