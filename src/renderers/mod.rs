//! Export renderers
//!
//! Turn a `DisplayList` into pixels. The software rasterizer is pure Rust
//! and runs anywhere; the browser paints through Canvas2D in `dom::paint`.

pub mod raster;
pub mod text_wrap;

pub use raster::{
    decode_data_url, encode_data_url, encode_jpeg, FontdueGlyphs, GlyphSource, ImageSet, LineMetrics, RgbCanvas,
    SoftwareRasterizer,
};
pub use text_wrap::{first_line_top, line_start_x, tracked_width, wrap_words};
