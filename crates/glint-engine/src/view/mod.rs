//! Viewport: the world-space rectangle currently mapped onto the window.
//!
//! Pan (right-button drag) and zoom (scroll) mutate it; resize re-derives its
//! size from the scale factor. Renderers consume it as an orthographic
//! view-projection matrix.

mod viewport;

pub use viewport::{pixel_proj, Viewport, DEFAULT_SCALE};
