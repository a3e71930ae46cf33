//! Browser glue (wasm32 only)
//!
//! DOM rendering of the display tree, region observation and the Canvas2D
//! export host.

pub mod display;
pub mod host;
pub mod paint;
pub mod resize;

pub use display::{apply_transform, build_canvas, DisplayView, FONT_FAMILY};
pub use host::{BrowserHost, BrowserSurface};
pub use paint::paint_list;
pub use resize::BrowserRegion;
