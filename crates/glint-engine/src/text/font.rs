use std::path::Path;

use anyhow::{Context, Result};

/// Resource path checked at construction when no font path is configured.
pub const DEFAULT_FONT_PATH: &str = "res/fonts/DejaVuSans.ttf";

/// Reads and parses the console font.
///
/// A missing or unparseable font is a hard construction failure: the render
/// thread is never started without one, so the console overlay can always
/// draw.
pub fn load_font(path: &Path) -> Result<fontdue::Font> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("could not read font asset at {}", path.display()))?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| anyhow::anyhow!("could not parse font {}: {e}", path.display()))
}
