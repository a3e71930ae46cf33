//! Fixed geometry for each canvas format
//!
//! Every number the layout uses lives here so the two formats can be compared
//! side by side. Values are logical canvas pixels.

use crate::models::CanvasFormat;

/// Geometry of one canvas format
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub format: CanvasFormat,
    pub width: f32,
    pub height: f32,

    // Header
    pub header_height: f32,
    pub header_rule: f32,
    pub header_padding_x: f32,
    pub logo_height: f32,
    pub logo_max_width: f32,
    pub brand_font: f32,
    pub category_font: f32,
    pub caption_font: f32,
    pub model_code_font: f32,
    pub model_block_width: f32,

    // Body
    pub body_padding: f32,
    pub column_gap: f32,
    /// Gap between the table and what sits under it
    pub stack_gap: f32,
    /// Share of the column row given to the primary column
    pub primary_share: f32,

    // Measurement table
    pub row_height: f32,
    pub name_column_share: f32,
    pub table_font: f32,
    pub table_placeholder_font: f32,
    pub table_padding_x: f32,
    pub table_border: f32,
    pub table_radius: f32,

    // Fabric panel
    pub panel_radius: f32,
    pub fabric_padding: f32,
    pub fabric_title_font: f32,
    pub fabric_title_gap: f32,
    pub fabric_columns: usize,
    pub fabric_gap_x: f32,
    pub fabric_gap_y: f32,
    pub fabric_label_font: f32,
    pub fabric_value_font: f32,

    // Silhouette and disclaimer
    pub silhouette_border: f32,
    pub silhouette_padding: f32,
    pub silhouette_opacity: f32,
    pub placeholder_font: f32,
    pub disclaimer_height: f32,
    pub disclaimer_gap: f32,
    pub disclaimer_padding: f32,
    pub disclaimer_font: f32,
    pub disclaimer_bar: f32,
    pub disclaimer_radius: f32,

    // Footer
    pub footer_height: f32,
    pub footer_font: f32,
}

impl LayoutMetrics {
    pub fn for_format(format: CanvasFormat) -> Self {
        match format {
            CanvasFormat::Portrait => Self::portrait(),
            CanvasFormat::Landscape => Self::landscape(),
        }
    }

    fn portrait() -> Self {
        let size = CanvasFormat::Portrait.size();
        Self {
            format: CanvasFormat::Portrait,
            width: size.width as f32,
            height: size.height as f32,

            header_height: 240.0,
            header_rule: 6.0,
            header_padding_x: 64.0,
            logo_height: 110.0,
            logo_max_width: 500.0,
            brand_font: 60.0,
            category_font: 30.0,
            caption_font: 20.0,
            model_code_font: 48.0,
            model_block_width: 420.0,

            body_padding: 48.0,
            column_gap: 40.0,
            stack_gap: 40.0,
            primary_share: 0.45,

            row_height: 90.0,
            name_column_share: 0.35,
            table_font: 30.0,
            table_placeholder_font: 24.0,
            table_padding_x: 40.0,
            table_border: 2.0,
            table_radius: 24.0,

            panel_radius: 24.0,
            fabric_padding: 40.0,
            fabric_title_font: 24.0,
            fabric_title_gap: 32.0,
            fabric_columns: 1,
            fabric_gap_x: 32.0,
            fabric_gap_y: 24.0,
            fabric_label_font: 14.0,
            fabric_value_font: 24.0,

            silhouette_border: 4.0,
            silhouette_padding: 16.0,
            silhouette_opacity: 0.90,
            placeholder_font: 30.0,
            disclaimer_height: 124.0,
            disclaimer_gap: 24.0,
            disclaimer_padding: 32.0,
            disclaimer_font: 20.0,
            disclaimer_bar: 10.0,
            disclaimer_radius: 16.0,

            footer_height: 80.0,
            footer_font: 24.0,
        }
    }

    fn landscape() -> Self {
        let size = CanvasFormat::Landscape.size();
        Self {
            format: CanvasFormat::Landscape,
            width: size.width as f32,
            height: size.height as f32,

            header_height: 220.0,
            header_rule: 6.0,
            header_padding_x: 64.0,
            logo_height: 90.0,
            logo_max_width: 500.0,
            brand_font: 60.0,
            category_font: 30.0,
            caption_font: 20.0,
            model_code_font: 48.0,
            model_block_width: 480.0,

            body_padding: 48.0,
            column_gap: 48.0,
            stack_gap: 40.0,
            primary_share: 0.65,

            row_height: 80.0,
            name_column_share: 0.30,
            table_font: 24.0,
            table_placeholder_font: 20.0,
            table_padding_x: 32.0,
            table_border: 2.0,
            table_radius: 24.0,

            panel_radius: 24.0,
            fabric_padding: 32.0,
            fabric_title_font: 20.0,
            fabric_title_gap: 16.0,
            fabric_columns: 3,
            fabric_gap_x: 32.0,
            fabric_gap_y: 24.0,
            fabric_label_font: 14.0,
            fabric_value_font: 20.0,

            silhouette_border: 4.0,
            silhouette_padding: 16.0,
            silhouette_opacity: 0.95,
            placeholder_font: 30.0,
            disclaimer_height: 102.0,
            disclaimer_gap: 32.0,
            disclaimer_padding: 24.0,
            disclaimer_font: 18.0,
            disclaimer_bar: 10.0,
            disclaimer_radius: 16.0,

            footer_height: 60.0,
            footer_font: 20.0,
        }
    }

    /// Height left for the body band
    pub fn body_height(&self) -> f32 {
        self.height - self.header_height - self.footer_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_fill_canvas_exactly() {
        for format in CanvasFormat::ALL {
            let m = LayoutMetrics::for_format(format);
            assert_eq!(m.header_height + m.body_height() + m.footer_height, m.height);
            assert!(m.body_height() > 0.0);
        }
    }

    #[test]
    fn test_portrait_header_taller_than_landscape() {
        let p = LayoutMetrics::for_format(CanvasFormat::Portrait);
        let l = LayoutMetrics::for_format(CanvasFormat::Landscape);
        assert!(p.header_height > l.header_height);
        assert!(p.footer_height > l.footer_height);
    }
}
