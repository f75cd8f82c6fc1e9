//! Paint model shared between the scene and renderers.
//!
//! Shapes carry a single solid fill; anything fancier (gradients, borders,
//! images) is out of scope for this surface.

mod color;

pub use color::Color;
