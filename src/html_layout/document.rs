//! Canvas-level layout computation
//!
//! This module contains the main entry point for layout calculations: it takes
//! a category and a form state snapshot and produces a DisplayList whose
//! logical size is exactly the active format's fixed dimensions.

use crate::config::{AppConfig, ChartLabels};
use crate::models::{CategoryDefinition, FormState};
use super::display_list::*;
use super::metrics::LayoutMetrics;
use super::{body, footer, header};

/// Everything a band builder reads
pub struct LayoutContext<'a> {
    pub category: &'a CategoryDefinition,
    pub form: &'a FormState,
    pub labels: &'a ChartLabels,
    pub metrics: LayoutMetrics,
}

/// Layout engine for size chart canvases
///
/// Layout is a pure function of its inputs: nothing here looks at the
/// viewport, the current scale or the clock.
pub struct LayoutEngine {
    labels: ChartLabels,
}

impl LayoutEngine {
    pub fn new(labels: ChartLabels) -> Self {
        Self { labels }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.labels().clone())
    }

    pub fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    /// Compute the complete canvas for a category and form snapshot
    ///
    /// The canvas has three bands stacked vertically: header, body and footer.
    /// Their heights always add up to the format height.
    pub fn compute_layout(&self, category: &CategoryDefinition, form: &FormState) -> DisplayList {
        let ctx = LayoutContext {
            category,
            form,
            labels: &self.labels,
            metrics: LayoutMetrics::for_format(form.canvas_format),
        };
        let m = &ctx.metrics;

        let header_rect = Rect::new(0.0, 0.0, m.width, m.header_height);
        let body_rect = Rect::new(0.0, m.header_height, m.width, m.body_height());
        let footer_rect = Rect::new(0.0, m.height - m.footer_height, m.width, m.footer_height);

        let bands = vec![
            Band {
                kind: BandKind::Header,
                rect: header_rect,
                items: header::layout_header(&ctx, header_rect),
            },
            Band {
                kind: BandKind::Body,
                rect: body_rect,
                items: body::layout_body(&ctx, body_rect),
            },
            Band {
                kind: BandKind::Footer,
                rect: footer_rect,
                items: footer::layout_footer(&ctx, footer_rect),
            },
        ];

        let size = form.canvas_format.size();
        log::debug!(
            "Layout computed: category={}, format={}, sizes={}, items={}",
            category.id,
            form.canvas_format,
            form.selected_sizes.len(),
            bands.iter().map(|b| b.items.len()).sum::<usize>()
        );

        DisplayList {
            format: form.canvas_format,
            width: size.width,
            height: size.height,
            background: palette::WHITE,
            bands,
        }
    }

    /// Layout for the category selected in the form (first category if unknown)
    pub fn layout_for(&self, config: &AppConfig, form: &FormState) -> DisplayList {
        self.compute_layout(config.category(&form.selected_category_id), form)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(ChartLabels::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanvasFormat;

    fn sample() -> (CategoryDefinition, FormState) {
        let config = AppConfig::builtin().unwrap();
        let form = FormState::for_config(&config);
        (config.default_category().clone(), form)
    }

    #[test]
    fn test_three_bands_in_order() {
        let (cat, form) = sample();
        let list = LayoutEngine::default().compute_layout(&cat, &form);
        let kinds: Vec<_> = list.bands.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BandKind::Header, BandKind::Body, BandKind::Footer]);
    }

    #[test]
    fn test_logical_size_matches_format() {
        let (cat, mut form) = sample();
        for format in CanvasFormat::ALL {
            form.canvas_format = format;
            let list = LayoutEngine::default().compute_layout(&cat, &form);
            assert_eq!(list.size(), format.size());
            let total: f32 = list.bands.iter().map(|b| b.rect.h).sum();
            assert_eq!(total, format.size().height as f32);
        }
    }

    #[test]
    fn test_items_stay_inside_their_band() {
        let (cat, mut form) = sample();
        form.selected_sizes = ["S", "M", "L", "XL"].into_iter().collect();
        form.set_fabric_value("Composition", "100% Cotton");
        for format in CanvasFormat::ALL {
            form.canvas_format = format;
            let list = LayoutEngine::default().compute_layout(&cat, &form);
            for band in &list.bands {
                for item in &band.items {
                    assert!(
                        band.rect.contains_rect(item.rect()),
                        "{:?} item {:?} escapes band {:?}",
                        format,
                        item.classes(),
                        band.kind
                    );
                }
            }
        }
    }
}
