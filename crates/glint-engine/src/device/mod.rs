//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue, configures the surface,
//! and hands out per-frame encoders/views to the renderers.

mod gpu;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
