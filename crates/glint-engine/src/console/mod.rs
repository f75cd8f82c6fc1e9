//! Console mode: a toggleable single-line command prompt.
//!
//! While active, committed text edits the command buffer instead of being
//! meaningful to the scene; Enter submits the buffer to the command handler.
//! Toggle (backquote) and submit (Enter) are independent key bindings.

/// Characters the text path never inserts: the toggle key's own character and
/// the carriage return that accompanies submission on some platforms.
const RESERVED: [char; 2] = ['`', '\r'];

const BACKSPACE: char = '\u{8}';

/// Console activation flag plus the accumulating command text.
#[derive(Debug, Default)]
pub struct Console {
    active: bool,
    buffer: String,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Flips console mode. Pending text survives a toggle-off.
    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Feeds committed text into the command buffer.
    ///
    /// No-op while inactive. Backspace pops the last character (and stays a
    /// no-op on an empty buffer); reserved characters are dropped; everything
    /// else appends.
    pub fn input(&mut self, text: &str) {
        if !self.active {
            return;
        }
        for ch in text.chars() {
            if ch == BACKSPACE {
                self.buffer.pop();
            } else if !RESERVED.contains(&ch) && !ch.is_control() {
                self.buffer.push(ch);
            }
        }
    }

    /// Takes the accumulated command and resets the buffer.
    ///
    /// Returns `None` while inactive (Enter outside console mode is an
    /// ordinary key press).
    pub fn submit(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }
        Some(std::mem::take(&mut self.buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── editing ───────────────────────────────────────────────────────────

    #[test]
    fn typed_text_accumulates_while_active() {
        let mut c = Console::new();
        c.toggle();
        c.input("sp");
        c.input("awn 10");
        assert_eq!(c.buffer(), "spawn 10");
    }

    #[test]
    fn text_is_ignored_while_inactive() {
        let mut c = Console::new();
        c.input("hello");
        assert_eq!(c.buffer(), "");
    }

    #[test]
    fn backspace_pops_one_character() {
        let mut c = Console::new();
        c.toggle();
        c.input("abc");
        c.input("\u{8}");
        assert_eq!(c.buffer(), "ab");
    }

    #[test]
    fn backspace_on_empty_buffer_is_a_no_op() {
        let mut c = Console::new();
        c.toggle();
        c.input("\u{8}");
        c.input("\u{8}");
        assert_eq!(c.buffer(), "");
    }

    #[test]
    fn toggle_character_and_carriage_return_are_not_inserted() {
        let mut c = Console::new();
        c.toggle();
        c.input("a`b\rc");
        assert_eq!(c.buffer(), "abc");
    }

    // ── toggle/submit ─────────────────────────────────────────────────────

    #[test]
    fn toggling_off_preserves_pending_text() {
        let mut c = Console::new();
        c.toggle();
        c.input("half a comm");
        c.toggle();
        c.toggle();
        assert_eq!(c.buffer(), "half a comm");
    }

    #[test]
    fn submit_returns_text_once_and_clears() {
        let mut c = Console::new();
        c.toggle();
        c.input("run fast");
        assert_eq!(c.submit().as_deref(), Some("run fast"));
        assert_eq!(c.buffer(), "");
        assert_eq!(c.submit().as_deref(), Some(""));
    }

    #[test]
    fn submit_while_inactive_yields_nothing() {
        let mut c = Console::new();
        c.input("x");
        assert_eq!(c.submit(), None);
    }
}
