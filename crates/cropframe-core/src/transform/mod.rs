//! Transform engine: rotation, scaling and rendering of the working buffer.
//!
//! The engine follows the replay model. The source image stays resident
//! and each operation re-renders the whole working buffer from it, so
//! resampling error never accumulates across operations.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the working buffer
//! - The square frame of side `long_length` is anchored at the origin
//! - Rotation is clockwise on screen, in exact quarter turns, about the frame center
//! - Scaling grows or shrinks the frame from the origin

mod buffer;
mod engine;
mod letterbox;
mod render;
mod state;

pub use buffer::{WorkingBuffer, DEFAULT_CANVAS_DIMENSION};
pub use engine::{TransformEngine, TransformOp};
pub use letterbox::{content_rect, letterbox, ContentRect, Letterbox};
pub use render::{render, render_into};
pub use state::{rotate90, scale_by, LongSide, Rotation, ScaleOp, ScalePolicy, TransformState};
