//! GPU rendering subsystem.
//!
//! Convention:
//! - scene geometry is tessellated on the CPU into flat colored triangles
//! - the vertex shader converts world (or overlay pixel) coordinates to NDC
//!   through an orthographic view-projection uniform
//! - the console line renders from a fontdue glyph atlas

mod common;
mod shape_pipeline;
mod tessellate;
mod text;

pub use shape_pipeline::{ShapeRenderer, ViewSlot};
pub use tessellate::{tessellate_into, tessellate_visible, ShapeVertex};
pub use text::TextRenderer;
