//! Software rasterizer for the export tree
//!
//! Paints a `DisplayList` into an RGB buffer at exactly the requested size
//! and encodes it as JPEG. Used by the native export host; the browser
//! paints through Canvas2D instead.

mod canvas;
mod images;
mod text;

use image::codecs::jpeg::JpegEncoder;
use image::ColorType;
use std::rc::Rc;

use crate::export::{ExportError, RasterOptions};
use crate::html_layout::{DisplayItem, DisplayList};

pub use canvas::RgbCanvas;
pub use images::{contain_rect, decode_data_url, draw_image, encode_data_url, ImageSet};
pub use text::{draw_text, FontdueGlyphs, GlyphBitmap, GlyphSource, LineMetrics};

/// Paints display lists without a browser
#[derive(Clone, Default)]
pub struct SoftwareRasterizer {
    glyphs: Option<Rc<dyn GlyphSource>>,
}

impl SoftwareRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterizer that can paint text
    pub fn with_glyphs(glyphs: Rc<dyn GlyphSource>) -> Self {
        Self { glyphs: Some(glyphs) }
    }

    pub fn has_glyphs(&self) -> bool {
        self.glyphs.is_some()
    }

    /// Paint `list` at exactly `options.size()`
    ///
    /// Fails if the list has visible text and no glyph source is set.
    pub fn render(
        &self,
        list: &DisplayList,
        images: &ImageSet,
        options: &RasterOptions,
    ) -> Result<RgbCanvas, ExportError> {
        if options.width == 0 || options.height == 0 {
            return Err(ExportError::Rasterize(format!(
                "empty surface {}x{}",
                options.width, options.height
            )));
        }
        if options.scale != 1.0 {
            return Err(ExportError::Rasterize(format!("unsupported scale {}", options.scale)));
        }

        let mut canvas = RgbCanvas::new(options.width, options.height, options.background);
        if list.background != options.background {
            canvas.fill_rect(
                &crate::html_layout::Rect::new(0.0, 0.0, options.width as f32, options.height as f32),
                list.background,
            );
        }

        for item in list.items() {
            match item {
                DisplayItem::Box(b) => {
                    if let Some(fill) = b.fill {
                        canvas.fill_rounded(&b.rect, b.radius, b.corners, fill);
                    }
                    if let Some(border) = &b.border {
                        canvas.stroke_border(&b.rect, border, b.radius, b.corners);
                    }
                }
                DisplayItem::Text(t) => match &self.glyphs {
                    Some(glyphs) => draw_text(&mut canvas, glyphs.as_ref(), t),
                    None if t.text.trim().is_empty() => {}
                    None => {
                        return Err(ExportError::FontsUnavailable(format!(
                            "no glyph source for text '{}'",
                            t.text
                        )))
                    }
                },
                DisplayItem::Image(i) => {
                    let image = images.get(&i.src).ok_or_else(|| {
                        ExportError::Rasterize(format!("image not loaded before capture: {}", i.src))
                    })?;
                    draw_image(&mut canvas, i, image);
                }
            }
        }

        log::trace!("Rasterized {} onto {}x{}", list.format, options.width, options.height);
        Ok(canvas)
    }
}

/// Encode an RGB canvas as baseline JPEG
pub fn encode_jpeg(canvas: &RgbCanvas, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ColorType::Rgb8,
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::export::ExportTree;
    use crate::html_layout::{class, LayoutEngine};
    use crate::models::{CanvasFormat, FormState};

    const REGULAR: &[u8] = include_bytes!("../../../tests/fonts/DejaVuSans.ttf");
    const BOLD: &[u8] = include_bytes!("../../../tests/fonts/DejaVuSans-Bold.ttf");

    fn rasterizer() -> SoftwareRasterizer {
        let glyphs = FontdueGlyphs::from_bytes(REGULAR).unwrap().with_bold(BOLD).unwrap();
        SoftwareRasterizer::with_glyphs(Rc::new(glyphs))
    }

    fn tree(format: CanvasFormat) -> ExportTree {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        form.canvas_format = format;
        form.selected_category_id = "dress".into();
        ExportTree::from_list(LayoutEngine::from_config(&config).layout_for(&config, &form))
    }

    #[test]
    fn test_render_matches_target_size() {
        let tree = tree(CanvasFormat::Landscape);
        let options = RasterOptions::for_tree(&tree);
        let canvas = rasterizer().render(&tree.list, &ImageSet::new(), &options).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1800, 1200));
        // Footer band is black
        assert_eq!(canvas.pixel(900, 1195), Some([0, 0, 0]));
    }

    #[test]
    fn test_text_is_painted_with_font() {
        let tree = tree(CanvasFormat::Portrait);
        let options = RasterOptions::for_tree(&tree);
        let canvas = rasterizer().render(&tree.list, &ImageSet::new(), &options).unwrap();

        let title = *tree.list.items_with_class(class::CATEGORY_TITLE).next().unwrap().rect();
        let dark = (title.y as u32..title.bottom() as u32)
            .flat_map(|y| (title.x as u32..title.right() as u32).map(move |x| (x, y)))
            .filter(|(x, y)| canvas.pixel(*x, *y).map_or(false, |p| p.iter().all(|c| *c < 200)))
            .count();
        assert!(dark > 50, "only {} dark pixels in the category title", dark);
    }

    #[test]
    fn test_text_without_glyph_source_is_an_error() {
        let tree = tree(CanvasFormat::Portrait);
        let options = RasterOptions::for_tree(&tree);
        let err = SoftwareRasterizer::new()
            .render(&tree.list, &ImageSet::new(), &options)
            .unwrap_err();
        assert!(matches!(err, ExportError::FontsUnavailable(_)));
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let config = AppConfig::builtin().unwrap();
        let form = FormState::for_config(&config);
        let tree = ExportTree::from_list(LayoutEngine::from_config(&config).layout_for(&config, &form));
        let options = RasterOptions::for_tree(&tree);
        let err = rasterizer().render(&tree.list, &ImageSet::new(), &options).unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(_)));
    }

    #[test]
    fn test_jpeg_output_decodes_to_same_size() {
        let canvas = RgbCanvas::new(64, 48, crate::html_layout::palette::WHITE);
        let bytes = encode_jpeg(&canvas, 95).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }
}
