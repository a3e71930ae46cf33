//! Decoded images for the software rasterizer

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::collections::HashMap;

use crate::export::ExportError;
use crate::html_layout::{BlendMode, ImageAlign, ImageItem, Rect};

use super::canvas::RgbCanvas;

/// Images referenced by a display list, decoded and keyed by `src`
#[derive(Default)]
pub struct ImageSet {
    images: HashMap<String, RgbaImage>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: impl Into<String>, image: RgbaImage) {
        self.images.insert(src.into(), image);
    }

    pub fn get(&self, src: &str) -> Option<&RgbaImage> {
        self.images.get(src)
    }

    pub fn contains(&self, src: &str) -> bool {
        self.images.contains_key(src)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decode encoded bytes (PNG or JPEG) and store them under `src`
    pub fn decode(&mut self, src: &str, bytes: &[u8]) -> Result<(), ExportError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| ExportError::ImageDecode {
            src: short_src(src),
            reason: e.to_string(),
        })?;
        self.insert(src, decoded.to_rgba8());
        Ok(())
    }
}

/// Payload of a `data:` URL, or `None` if `src` is not one
pub fn decode_data_url(src: &str) -> Option<Result<Vec<u8>, ExportError>> {
    let rest = src.strip_prefix("data:")?;
    let Some((header, payload)) = rest.split_once(',') else {
        return Some(Err(ExportError::ImageDecode {
            src: short_src(src),
            reason: "malformed data URL".to_string(),
        }));
    };
    if header.ends_with(";base64") {
        Some(STANDARD.decode(payload.trim()).map_err(|e| ExportError::ImageDecode {
            src: short_src(src),
            reason: e.to_string(),
        }))
    } else {
        Some(Ok(payload.as_bytes().to_vec()))
    }
}

/// Data URL for encoded image bytes, with the MIME type sniffed from them
pub fn encode_data_url(bytes: &[u8]) -> Option<String> {
    let mime = match image::guess_format(bytes).ok()? {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        _ => return None,
    };
    Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Data URLs are long; keep error messages readable
fn short_src(src: &str) -> String {
    const MAX: usize = 48;
    if src.chars().count() > MAX {
        let head: String = src.chars().take(MAX).collect();
        format!("{}...", head)
    } else {
        src.to_string()
    }
}

/// Placement of an image scaled to fit (contain) inside `rect`
pub fn contain_rect(rect: &Rect, image_w: u32, image_h: u32, align: ImageAlign) -> Rect {
    if image_w == 0 || image_h == 0 {
        return Rect::new(rect.x, rect.y, 0.0, 0.0);
    }
    let scale = (rect.w / image_w as f32).min(rect.h / image_h as f32);
    let w = image_w as f32 * scale;
    let h = image_h as f32 * scale;
    let x = match align {
        ImageAlign::Start => rect.x,
        ImageAlign::Center => rect.x + (rect.w - w) / 2.0,
    };
    Rect::new(x, rect.y + (rect.h - h) / 2.0, w, h)
}

pub fn draw_image(canvas: &mut RgbCanvas, item: &ImageItem, image: &RgbaImage) {
    let target = contain_rect(&item.rect, image.width(), image.height(), item.align);
    let w = target.w.round() as u32;
    let h = target.h.round() as u32;
    if w == 0 || h == 0 {
        return;
    }
    let scaled = imageops::resize(image, w, h, FilterType::Triangle);
    let x0 = target.x.round() as i32;
    let y0 = target.y.round() as i32;

    for (x, y, px) in scaled.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let alpha = a as f32 / 255.0 * item.opacity;
        let (cx, cy) = (x0 + x as i32, y0 + y as i32);
        match item.blend {
            BlendMode::Normal => canvas.blend_pixel(cx, cy, [r, g, b], alpha),
            BlendMode::Multiply => canvas.multiply_pixel(cx, cy, [r, g, b], alpha),
        }
    }
}
