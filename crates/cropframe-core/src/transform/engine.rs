//! Sequencing of transform operations and buffer publication.

use crate::decode::{FilterType, SourceImage};

use super::buffer::WorkingBuffer;
use super::render::render_into;
use super::state::{rotate90, scale_by, ScaleOp, TransformState};

/// A requested geometric operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Rotate +90° about the frame center.
    Rotate90,
    /// Change the scale.
    Scale(ScaleOp),
}

/// Computes new transform states and renders them.
///
/// Each render goes into a scratch buffer that is swapped with the live
/// buffer only once it is complete, so a reader never observes a
/// half-drawn frame.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    filter: FilterType,
    min_scale: f64,
    scratch: WorkingBuffer,
}

impl TransformEngine {
    pub fn new(dimension: u32, filter: FilterType, min_scale: f64) -> Self {
        Self {
            filter,
            min_scale,
            scratch: WorkingBuffer::new(dimension),
        }
    }

    /// Side length of the buffers this engine renders.
    pub fn dimension(&self) -> u32 {
        self.scratch.dimension()
    }

    /// Initial state and buffer for a freshly loaded source.
    pub fn initialize(&mut self, source: &SourceImage) -> (TransformState, WorkingBuffer) {
        let state = TransformState::initial(source.width, source.height);
        let mut buffer = WorkingBuffer::new(self.dimension());
        self.publish(source, &state, &mut buffer);

        tracing::debug!(
            width = source.width,
            height = source.height,
            long_length = state.long_length(),
            "initialized working buffer"
        );
        (state, buffer)
    }

    /// Apply `op` to `state`, re-render, and publish the result into `buffer`.
    pub fn apply(
        &mut self,
        source: &SourceImage,
        state: &TransformState,
        op: TransformOp,
        buffer: &mut WorkingBuffer,
    ) -> TransformState {
        let next = match op {
            TransformOp::Rotate90 => rotate90(state),
            TransformOp::Scale(scale_op) => scale_by(state, scale_op, self.min_scale),
        };

        self.publish(source, &next, buffer);

        tracing::debug!(
            ?op,
            scale = next.scale,
            rotation = next.rotation.degrees(),
            "applied transform"
        );
        next
    }

    fn publish(&mut self, source: &SourceImage, state: &TransformState, buffer: &mut WorkingBuffer) {
        render_into(source, state, self.filter, &mut self.scratch);
        std::mem::swap(&mut self.scratch, buffer);
    }
}
