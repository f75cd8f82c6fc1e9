//! Font loading.

mod font;

pub use font::{load_font, DEFAULT_FONT_PATH};
