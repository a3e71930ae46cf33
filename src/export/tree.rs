//! Export tree and the values that flow through an export

use crate::html_layout::{palette, Color, DisplayList};
use crate::models::{FormState, PixelSize};

use super::filename::export_filename;

pub const JPEG_MIME: &str = "image/jpeg";
/// Encoder quality on the 0..1 scale browsers use
pub const JPEG_QUALITY: f32 = 0.95;

/// Everything an export needs, captured when it is triggered
///
/// Later form edits do not reach an export that is already running.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportJob {
    pub list: DisplayList,
    pub filename: String,
}

impl ExportJob {
    pub fn new(list: DisplayList, filename: impl Into<String>) -> Self {
        Self {
            list,
            filename: filename.into(),
        }
    }

    /// Job for a rendered canvas and the form it was rendered from
    pub fn for_form(list: DisplayList, form: &FormState, category_id: &str) -> Self {
        let filename = export_filename(&form.model_code, category_id, list.format);
        Self::new(list, filename)
    }
}

/// Scale-free copy of the canvas, sized exactly to the target
///
/// Lives for one export only.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportTree {
    pub list: DisplayList,
    pub size: PixelSize,
}

impl ExportTree {
    pub fn from_list(list: DisplayList) -> Self {
        let size = list.size();
        Self { list, size }
    }
}

/// Rasterization parameters; always 1:1 at the target size
#[derive(Clone, Debug, PartialEq)]
pub struct RasterOptions {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    /// Window size the renderer should assume
    pub window_width: u32,
    pub window_height: u32,
    pub background: Color,
    /// Load images with anonymous CORS
    pub use_cors: bool,
    pub quality: f32,
}

impl RasterOptions {
    pub fn for_tree(tree: &ExportTree) -> Self {
        Self {
            scale: 1.0,
            width: tree.size.width,
            height: tree.size.height,
            window_width: tree.size.width,
            window_height: tree.size.height,
            background: palette::WHITE,
            use_cors: true,
            quality: JPEG_QUALITY,
        }
    }

    /// Quality for encoders taking 1..=100
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

/// Encoded raster output
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn jpeg(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            mime: JPEG_MIME,
            bytes,
        }
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

/// The finished download
#[derive(Clone, Debug, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub size: PixelSize,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::html_layout::LayoutEngine;
    use crate::models::CanvasFormat;

    #[test]
    fn test_raster_options_match_tree() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        form.canvas_format = CanvasFormat::Landscape;
        let tree = ExportTree::from_list(LayoutEngine::from_config(&config).layout_for(&config, &form));

        let options = RasterOptions::for_tree(&tree);
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.size(), PixelSize::new(1800, 1200));
        assert_eq!((options.window_width, options.window_height), (1800, 1200));
        assert_eq!(options.jpeg_quality(), 95);
        assert!(options.use_cors);
    }

    #[test]
    fn test_job_filename_from_form() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        form.model_code = "ABC123".into();
        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
        let job = ExportJob::for_form(list, &form, "tshirt");
        assert_eq!(job.filename, "Size-Chart-ABC123-portrait.jpg");
    }
}
