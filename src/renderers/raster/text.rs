//! Glyph access for the software rasterizer

use fontdue::{Font, FontSettings};

use crate::export::ExportError;
use crate::html_layout::{FontWeight, TextItem};
use crate::renderers::text_wrap::{first_line_top, line_start_x, tracked_width, wrap_words};

use super::canvas::RgbCanvas;

/// Vertical font metrics at a pixel size; `descent` is positive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
}

/// Coverage bitmap of one glyph
///
/// `xmin` is the offset from the pen position, `ymin` the offset of the
/// bitmap's bottom edge above the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    pub xmin: i32,
    pub ymin: i32,
    pub coverage: Vec<u8>,
}

/// Source of glyph shapes and advances
pub trait GlyphSource {
    fn advance(&self, ch: char, size: f32, weight: FontWeight) -> f32;
    fn line_metrics(&self, size: f32) -> LineMetrics;
    fn rasterize(&self, ch: char, size: f32, weight: FontWeight) -> GlyphBitmap;

    fn measure(&self, text: &str, size: f32, weight: FontWeight) -> f32 {
        text.chars().map(|ch| self.advance(ch, size, weight)).sum()
    }
}

/// Glyphs from TrueType/OpenType fonts, with an optional bold face
pub struct FontdueGlyphs {
    regular: Font,
    bold: Option<Font>,
}

impl FontdueGlyphs {
    pub fn from_bytes(regular: &[u8]) -> Result<Self, ExportError> {
        Ok(Self {
            regular: load_font(regular)?,
            bold: None,
        })
    }

    pub fn with_bold(mut self, bold: &[u8]) -> Result<Self, ExportError> {
        self.bold = Some(load_font(bold)?);
        Ok(self)
    }

    fn face(&self, weight: FontWeight) -> &Font {
        match &self.bold {
            Some(bold) if weight.is_bold() => bold,
            _ => &self.regular,
        }
    }
}

fn load_font(bytes: &[u8]) -> Result<Font, ExportError> {
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| ExportError::FontsUnavailable(e.to_string()))
}

impl GlyphSource for FontdueGlyphs {
    fn advance(&self, ch: char, size: f32, weight: FontWeight) -> f32 {
        self.face(weight).metrics(ch, size).advance_width
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        match self.regular.horizontal_line_metrics(size) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: -m.descent,
            },
            None => LineMetrics {
                ascent: size * 0.8,
                descent: size * 0.2,
            },
        }
    }

    fn rasterize(&self, ch: char, size: f32, weight: FontWeight) -> GlyphBitmap {
        let (metrics, coverage) = self.face(weight).rasterize(ch, size);
        GlyphBitmap {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            coverage,
        }
    }
}

/// Horizontal shear applied to italic text
const ITALIC_SLANT: f32 = 0.2;

/// Paint a text item: wrap, align, center vertically in its line boxes
///
/// Ink is clipped to the item's rect.
pub fn draw_text(canvas: &mut RgbCanvas, glyphs: &dyn GlyphSource, item: &TextItem) {
    let style = &item.style;
    if item.text.trim().is_empty() {
        return;
    }
    let measure = |s: &str| tracked_width(s, style.letter_spacing, |t| glyphs.measure(t, style.size, style.weight));
    let lines = if style.wrap {
        wrap_words(&item.text, item.rect.w, measure)
    } else {
        vec![item.text.clone()]
    };

    let metrics = glyphs.line_metrics(style.size);
    let line_h = style.line_height.max(metrics.ascent + metrics.descent);
    let color = [style.color.r, style.color.g, style.color.b];
    let mut top = first_line_top(item.rect.y, item.rect.h, line_h, style.wrap);
    let clip = (
        item.rect.x.floor() as i32,
        item.rect.y.floor() as i32,
        item.rect.right().ceil() as i32,
        item.rect.bottom().ceil() as i32,
    );

    for (index, line) in lines.iter().enumerate() {
        if index > 0 && top + line_h > item.rect.bottom() + 0.5 {
            break;
        }
        let mut pen_x = line_start_x(&item.rect, measure(line), style.align);
        let baseline = top + (line_h - metrics.ascent - metrics.descent) / 2.0 + metrics.ascent;

        for ch in line.chars() {
            let glyph = glyphs.rasterize(ch, style.size, style.weight);
            let gx = pen_x.round() as i32 + glyph.xmin;
            let gy = baseline.round() as i32 - glyph.height as i32 - glyph.ymin;
            for (i, alpha) in glyph.coverage.iter().enumerate() {
                if *alpha == 0 {
                    continue;
                }
                let row = (i / glyph.width.max(1)) as i32;
                let col = (i % glyph.width.max(1)) as i32;
                let py = gy + row;
                let shear = if style.italic {
                    ((baseline - py as f32) * ITALIC_SLANT).round() as i32
                } else {
                    0
                };
                let px = gx + col + shear;
                if px < clip.0 || py < clip.1 || px >= clip.2 || py >= clip.3 {
                    continue;
                }
                canvas.blend_pixel(px, py, color, *alpha as f32 / 255.0);
            }
            pen_x += glyphs.advance(ch, style.size, style.weight) + style.letter_spacing;
        }

        top += line_h;
    }
}
