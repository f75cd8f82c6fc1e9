//! glint engine crate.
//!
//! An interactive 2D visualization surface: stage shapes from your thread,
//! publish them with `flip()`, and a background render loop draws the
//! published set at vsync rate with pan/zoom, culling, and a toggleable
//! command console (backquote opens it, Enter submits).

pub mod console;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
pub mod view;

mod viz;
mod window;

pub use coords::{Rect, Vec2};
pub use input::{ButtonState, InputEvent, Key, KeyState, MouseButton, WheelDelta};
pub use paint::Color;
pub use scene::Shape;
pub use viz::{CommandHandler, Config, EventHandler, Visualization};
