//! Pure text-layout and viewport engine.
//!
//! No terminal I/O lives here: [`render`] maps a transcript and a
//! viewport size to the exact window of display lines the UI should
//! show.

pub mod render;
pub mod wrap;

pub use render::{render, RenderStyle, Viewport, CHROME_ROWS, MARGIN};
pub use wrap::wrap;
