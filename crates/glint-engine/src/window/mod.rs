//! Window + render loop.
//!
//! Owns the winit event loop and window on a dedicated thread and wires them
//! to the GPU layer, the published scene, and the console.

mod runtime;

pub(crate) use runtime::run_render_loop;
