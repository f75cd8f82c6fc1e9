//! Scene model: drawable shapes and the double-buffered hand-off between the
//! producer thread and the render loop.
//!
//! Responsibilities:
//! - shape variants with geometry constructors and world-space bounds
//! - `SceneBuffer`: pending (producer-owned) and visible (shared) shape lists
//!   with an atomic `flip` publish

mod buffer;
mod shape;

pub use buffer::{SceneBuffer, VisibleShapes};
pub use shape::{Shape, CIRCLE_SIDES, LINE_THICKNESS};
