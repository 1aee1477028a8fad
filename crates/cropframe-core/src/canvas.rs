//! Raster canvas state: the editing session tying source, transform and crop together.
//!
//! [`RasterCanvas`] holds exactly one [`TransformState`] and one
//! [`WorkingBuffer`] and keeps them consistent. Every user operation is a
//! discrete, synchronous call. Operations issued before a source has been
//! loaded are ignored rather than run against empty data.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize──▶ Ready ◀──rotate / scale──┐
//!                                 │  ▲                    │
//!                      set_crop   │  │ rotate / scale     │
//!                                 ▼  │                    │
//!                               Cropped ──set_crop────────┘
//! ```

use crate::config::{ConfigError, EditorConfig};
use crate::crop::{extract, CropRegion, OutputBuffer};
use crate::decode::{decode_image_with_limit, DecodeError, SourceImage};
use crate::encode::{encode_output, EncodeError};
use crate::transform::{
    content_rect, ContentRect, TransformEngine, TransformOp, TransformState, WorkingBuffer,
};

/// Receives every freshly published working buffer.
///
/// This is where a host plugs in its drawing surface.
pub trait FrameSink {
    fn present(&mut self, frame: &WorkingBuffer, state: &TransformState);
}

/// Where the canvas is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasPhase {
    /// No source loaded yet.
    Uninitialized,
    /// A source is loaded and rendered.
    Ready,
    /// A crop output exists for the current buffer.
    Cropped,
}

/// Everything that only exists once a source has been loaded.
struct Session {
    source: SourceImage,
    state: TransformState,
    buffer: WorkingBuffer,
    crop: Option<(CropRegion, OutputBuffer)>,
}

/// The editing surface.
pub struct RasterCanvas {
    config: EditorConfig,
    engine: TransformEngine,
    session: Option<Session>,
    sink: Option<Box<dyn FrameSink>>,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("state", &self.state())
            .finish()
    }
}

impl Default for RasterCanvas {
    fn default() -> Self {
        Self::from_valid_config(EditorConfig::default())
    }
}

impl RasterCanvas {
    /// Create a canvas with a validated configuration.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EditorConfig) -> Self {
        let engine = TransformEngine::new(config.canvas_dimension, config.filter, config.min_scale);
        Self {
            config,
            engine,
            session: None,
            sink: None,
        }
    }

    /// Attach a sink that is shown every new frame.
    pub fn set_sink(&mut self, sink: Box<dyn FrameSink>) {
        self.sink = Some(sink);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn phase(&self) -> CanvasPhase {
        match &self.session {
            None => CanvasPhase::Uninitialized,
            Some(Session { crop: None, .. }) => CanvasPhase::Ready,
            Some(Session { crop: Some(_), .. }) => CanvasPhase::Cropped,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Current transform state, if a source is loaded.
    pub fn state(&self) -> Option<&TransformState> {
        self.session.as_ref().map(|s| &s.state)
    }

    /// Current working buffer, if a source is loaded.
    pub fn buffer(&self) -> Option<&WorkingBuffer> {
        self.session.as_ref().map(|s| &s.buffer)
    }

    /// Bounding box of the visible image in buffer coordinates.
    pub fn content_rect(&self) -> Option<ContentRect> {
        self.state().map(content_rect)
    }

    /// The last committed crop region.
    pub fn crop_region(&self) -> Option<&CropRegion> {
        self.session.as_ref()?.crop.as_ref().map(|(region, _)| region)
    }

    /// The last extracted crop.
    pub fn output(&self) -> Option<&OutputBuffer> {
        self.session.as_ref()?.crop.as_ref().map(|(_, output)| output)
    }

    /// Decode `bytes` and initialize the canvas with the result.
    ///
    /// On error the canvas keeps whatever it showed before.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let source = decode_image_with_limit(bytes, self.config.max_source_pixels)?;
        self.initialize(source);
        Ok(())
    }

    /// Start a new session with `source` at scale 1 and no rotation.
    ///
    /// Any previous crop is discarded. Empty sources and sources whose
    /// pixel buffer does not match their dimensions are ignored.
    pub fn initialize(&mut self, source: SourceImage) {
        if source.is_empty() {
            tracing::warn!("ignoring empty source image");
            return;
        }
        if !source.has_consistent_len() {
            tracing::warn!(
                width = source.width,
                height = source.height,
                len = source.pixels.len(),
                "ignoring source image with mismatched pixel buffer"
            );
            return;
        }

        let (state, buffer) = self.engine.initialize(&source);
        self.session = Some(Session {
            source,
            state,
            buffer,
            crop: None,
        });
        self.present();
    }

    /// Rotate the content +90° about the frame center.
    pub fn rotate90(&mut self) {
        self.apply(TransformOp::Rotate90);
    }

    /// Zoom in by one step of the configured policy.
    pub fn zoom_in(&mut self) {
        self.apply(TransformOp::Scale(self.config.scale_policy.zoom_in()));
    }

    /// Zoom out by one step of the configured policy.
    pub fn zoom_out(&mut self) {
        self.apply(TransformOp::Scale(self.config.scale_policy.zoom_out()));
    }

    /// Scale by `step`, read as a delta or a factor depending on the policy.
    pub fn scale_by(&mut self, step: f64) {
        self.apply(TransformOp::Scale(self.config.scale_policy.op(step)));
    }

    fn apply(&mut self, op: TransformOp) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(?op, "canvas not ready, ignoring transform");
            return;
        };

        session.state = self
            .engine
            .apply(&session.source, &session.state, op, &mut session.buffer);
        // The old crop was cut from pixels that no longer exist
        session.crop = None;
        self.present();
    }

    /// Commit a crop region from the selection widget and extract it.
    ///
    /// With `lock_aspect` set the region is first fitted to the configured
    /// ratio. Returns the new output, or `None` if the canvas is not ready
    /// or the region misses the buffer entirely (the previous crop is then
    /// cleared).
    pub fn set_crop_region(&mut self, region: CropRegion) -> Option<&OutputBuffer> {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(?region, "canvas not ready, ignoring crop");
            return None;
        };

        let region = if self.config.lock_aspect {
            region.fit_aspect(self.config.aspect_ratio)
        } else {
            region
        };

        session.crop = extract(&session.buffer, &region).map(|output| (region, output));
        session.crop.as_ref().map(|(_, output)| output)
    }

    /// Drop the current crop, returning to `Ready`.
    pub fn clear_crop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.crop = None;
        }
    }

    /// Encode the current crop as PNG.
    ///
    /// Returns `Ok(None)` when there is nothing to export.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, EncodeError> {
        self.output().map(encode_output).transpose()
    }

    fn present(&mut self) {
        if let (Some(sink), Some(session)) = (self.sink.as_mut(), self.session.as_ref()) {
            sink.present(&session.buffer, &session.state);
        }
    }
}
