//! Coordinate and geometry types shared across the scene, viewport and renderers.
//!
//! Canonical space:
//! - World units (caller-defined scale)
//! - +X right, +Y down
//!
//! The viewport maps a world-space rectangle onto the window; renderers convert
//! world coordinates to NDC in shaders using a view-projection uniform.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
