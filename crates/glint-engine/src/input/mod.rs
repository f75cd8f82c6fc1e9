//! Input event model.
//!
//! The caller-facing event callback receives these platform-agnostic types;
//! winit types never cross the public API. Translation from winit events
//! lives in the runtime module.

mod types;

pub use types::{
    ButtonState, InputEvent, Key, KeyState, MouseButton, WheelDelta,
};
