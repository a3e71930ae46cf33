//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use sizechart_wasm::html_layout::FontWeight;
use sizechart_wasm::renderers::raster::{FontdueGlyphs, GlyphBitmap, GlyphSource, LineMetrics};
use sizechart_wasm::{AppConfig, FormState, MemoryHost};

/// Glyphs drawn as solid blocks, so text produces ink without a font file
pub struct BlockGlyphs;

impl GlyphSource for BlockGlyphs {
    fn advance(&self, _ch: char, size: f32, weight: FontWeight) -> f32 {
        if weight.is_bold() {
            size * 0.65
        } else {
            size * 0.55
        }
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        LineMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
        }
    }

    fn rasterize(&self, ch: char, size: f32, _weight: FontWeight) -> GlyphBitmap {
        let side = if ch.is_whitespace() { 0 } else { (size * 0.5).max(1.0) as usize };
        GlyphBitmap {
            width: side,
            height: side,
            xmin: 0,
            ymin: 0,
            coverage: vec![255; side * side],
        }
    }
}

pub fn config() -> AppConfig {
    AppConfig::builtin().expect("built-in config parses")
}

pub fn form(config: &AppConfig) -> FormState {
    FormState::for_config(config)
}

/// Form with sizes selected and a value in every cell
pub fn filled_form(config: &AppConfig, sizes: &[&str]) -> FormState {
    let mut form = FormState::for_config(config);
    form.selected_sizes = sizes.iter().copied().collect();
    let category = config.category(&form.selected_category_id).clone();
    for (i, size) in sizes.iter().enumerate() {
        for (j, name) in category.measurements.iter().enumerate() {
            form.set_measurement(size, name, &(40 + i * 2 + j).to_string());
        }
    }
    for property in &category.fabric_properties {
        form.set_fabric_value(property, "Value");
    }
    form
}

pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encodes");
    bytes
}

pub const REGULAR_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
pub const BOLD_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

pub fn dejavu() -> FontdueGlyphs {
    FontdueGlyphs::from_bytes(REGULAR_FONT)
        .and_then(|g| g.with_bold(BOLD_FONT))
        .expect("DejaVu Sans loads")
}

/// Host with block glyphs and every catalogue silhouette available
pub fn memory_host(config: &AppConfig) -> MemoryHost {
    with_silhouettes(MemoryHost::with_glyphs(Rc::new(BlockGlyphs)), config)
}

/// Host rendering text with DejaVu Sans
pub fn font_host(config: &AppConfig) -> MemoryHost {
    with_silhouettes(MemoryHost::with_glyphs(Rc::new(dejavu())), config)
}

fn with_silhouettes(host: MemoryHost, config: &AppConfig) -> MemoryHost {
    for category in config.categories() {
        if let Some(src) = category.silhouette() {
            host.add_resource(src, png_bytes(8, 12, [90, 90, 90, 255]));
        }
    }
    host
}

/// Pending once, then ready
pub struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn yield_once() -> YieldOnce {
    YieldOnce(false)
}
