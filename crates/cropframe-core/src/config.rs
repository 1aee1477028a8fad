//! Editor configuration.
//!
//! All fields have defaults, so a host may pass a partial object (or none
//! at all) and only override what it needs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop::AspectRatio;
use crate::decode::{FilterType, DEFAULT_MAX_SOURCE_PIXELS};
use crate::transform::{ScalePolicy, DEFAULT_CANVAS_DIMENSION};

/// Smallest scale a zoom out may reach by default.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Largest accepted canvas side length. A buffer this size is 1 GiB of RGBA.
pub const MAX_CANVAS_DIMENSION: u32 = 16384;

/// Reasons an [`EditorConfig`] is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Canvas dimension must be non-zero")]
    ZeroCanvas,

    #[error("Canvas dimension {dimension} exceeds the maximum of {max}")]
    CanvasTooLarge { dimension: u32, max: u32 },

    #[error("Aspect ratio {width}:{height} must have non-zero terms")]
    InvalidAspectRatio { width: u32, height: u32 },

    #[error("Minimum scale must be positive and finite, got {0}")]
    InvalidMinScale(f64),

    #[error("Zoom step {0} would not change the scale")]
    InvalidZoomStep(f64),
}

/// Settings for one editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Side length of the square working buffer in pixels.
    pub canvas_dimension: u32,
    /// Ratio crop regions are fitted to when `lock_aspect` is set.
    pub aspect_ratio: AspectRatio,
    /// Fit incoming crop regions to `aspect_ratio` before extraction.
    pub lock_aspect: bool,
    /// How zoom in/out combine with the current scale.
    pub scale_policy: ScalePolicy,
    /// Lower bound for the scale factor.
    pub min_scale: f64,
    /// Sampling filter for renders.
    pub filter: FilterType,
    /// Largest source image accepted, in pixels.
    pub max_source_pixels: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_dimension: DEFAULT_CANVAS_DIMENSION,
            aspect_ratio: AspectRatio::PORTRAIT_5_6,
            lock_aspect: true,
            scale_policy: ScalePolicy::default(),
            min_scale: DEFAULT_MIN_SCALE,
            filter: FilterType::default(),
            max_source_pixels: DEFAULT_MAX_SOURCE_PIXELS,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas_dimension(mut self, dimension: u32) -> Self {
        self.canvas_dimension = dimension;
        self
    }

    pub fn with_scale_policy(mut self, policy: ScalePolicy) -> Self {
        self.scale_policy = policy;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_lock_aspect(mut self, lock: bool) -> Self {
        self.lock_aspect = lock;
        self
    }

    /// Check the configuration for values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_dimension == 0 {
            return Err(ConfigError::ZeroCanvas);
        }

        if self.canvas_dimension > MAX_CANVAS_DIMENSION {
            return Err(ConfigError::CanvasTooLarge {
                dimension: self.canvas_dimension,
                max: MAX_CANVAS_DIMENSION,
            });
        }

        if !self.aspect_ratio.is_valid() {
            return Err(ConfigError::InvalidAspectRatio {
                width: self.aspect_ratio.width,
                height: self.aspect_ratio.height,
            });
        }

        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(ConfigError::InvalidMinScale(self.min_scale));
        }

        match self.scale_policy {
            ScalePolicy::Additive { delta } if !(delta.is_finite() && delta > 0.0) => {
                Err(ConfigError::InvalidZoomStep(delta))
            }
            ScalePolicy::Multiplicative { factor }
                if !(factor.is_finite() && factor > 0.0) || factor == 1.0 =>
            {
                Err(ConfigError::InvalidZoomStep(factor))
            }
            _ => Ok(()),
        }
    }
}
