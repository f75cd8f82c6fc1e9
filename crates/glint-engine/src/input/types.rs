use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Printable keys arrive as `Char` (lowercase, layout-dependent); named keys
/// cover what the surface itself reacts to plus common control keys. Anything
/// else is `Unknown` and is still forwarded to the caller's event handler.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Key {
    Enter,
    Backspace,
    Escape,
    Tab,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A printable character, e.g. `Char('a')` or `Char('`')`.
    Char(char),
    Unknown,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Scroll delta. `Line` is one notch per unit; `Pixel` is high-precision
/// (touchpads), converted at a fixed pixels-per-line factor where a notch
/// count is needed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Events forwarded to the caller's event handler, in arrival order, after
/// the surface's own handling (pan/zoom/console) has run.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True for OS key-repeat events.
        repeat: bool,
    },
    /// Committed text produced by a key press (what a text field would see).
    Text(String),
    /// Pointer position in window pixels.
    PointerMoved(Vec2),
    PointerButton {
        button: MouseButton,
        state: ButtonState,
        /// Pointer position in window pixels at the time of the event.
        pos: Vec2,
    },
    Wheel(WheelDelta),
    Resized { width: u32, height: u32 },
    Focused(bool),
    CloseRequested,
}
