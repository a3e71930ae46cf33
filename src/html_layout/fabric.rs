//! Fabric property panel
//!
//! Lists the category's fabric properties that have a value, in category
//! order. Absent properties take no space; with nothing to show the panel
//! prints a single placeholder line.

use super::display_list::*;
use super::document::LayoutContext;
use super::items;

const LABEL_LINE: f32 = 20.0;
const LABEL_GAP: f32 = 8.0;
const ENTRY_PADDING: f32 = 8.0;
const MAX_VALUE_LINES: usize = 3;

/// Average advance of a glyph relative to the font size, used to estimate
/// how many lines a value wraps to
const AVERAGE_ADVANCE: f32 = 0.55;

/// Estimated wrapped line count for a value at a given width
pub fn estimate_lines(text: &str, font_size: f32, width: f32) -> usize {
    if width <= 0.0 {
        return 1;
    }
    let text_w = text.chars().count() as f32 * font_size * AVERAGE_ADVANCE;
    ((text_w / width).ceil() as usize).clamp(1, MAX_VALUE_LINES)
}

pub fn layout_fabric_panel(ctx: &LayoutContext, rect: Rect) -> Vec<DisplayItem> {
    let m = &ctx.metrics;
    let mut out = Vec::new();

    out.push(items::panel(
        rect,
        Some(palette::ZINC_900),
        None,
        m.panel_radius,
        Corners::All,
        &[class::FABRIC_PANEL],
    ));

    let inner = rect.inset(m.fabric_padding);
    if inner.h <= 0.0 {
        return out;
    }

    let title_h = (m.fabric_title_font * 1.5).round();
    out.push(items::text(
        Rect::new(inner.x, inner.y, inner.w, title_h.min(inner.h)),
        &ctx.labels.product_details_title.to_uppercase(),
        TextStyle::new(m.fabric_title_font, FontWeight::Bold, palette::ZINC_400).tracking_em(0.1),
        &[class::FABRIC_TITLE],
    ));

    let divider_y = inner.y + title_h + 16.0;
    if divider_y + 1.0 <= inner.bottom() {
        out.push(items::fill(
            Rect::new(inner.x, divider_y, inner.w, 1.0),
            palette::ZINC_700,
            &[class::DIVIDER],
        ));
    }
    let list_top = divider_y + 1.0 + m.fabric_title_gap;

    let visible: Vec<(&str, &str)> = ctx
        .category
        .fabric_properties
        .iter()
        .filter_map(|prop| ctx.form.fabric_value(prop).map(|value| (prop.as_str(), value)))
        .collect();

    if visible.is_empty() {
        let line_h = (m.fabric_value_font * 1.5).round();
        let y = list_top + 16.0;
        if y + line_h <= inner.bottom() {
            out.push(items::text(
                Rect::new(inner.x, y, inner.w, line_h),
                &ctx.labels.no_details_placeholder,
                TextStyle::new(m.fabric_value_font, FontWeight::Regular, palette::ZINC_600).italic(),
                &[class::FABRIC_EMPTY],
            ));
        }
        return out;
    }

    let columns = m.fabric_columns.max(1);
    let col_w = (inner.w - m.fabric_gap_x * (columns - 1) as f32) / columns as f32;
    let value_line = (m.fabric_value_font * 1.5).round();

    let mut row_top = list_top;
    for chunk in visible.chunks(columns) {
        let heights: Vec<f32> = chunk
            .iter()
            .map(|(_, value)| {
                let lines = estimate_lines(value, m.fabric_value_font, col_w);
                LABEL_LINE + LABEL_GAP + value_line * lines as f32 + ENTRY_PADDING + 1.0
            })
            .collect();
        let row_h = heights.iter().cloned().fold(0.0, f32::max);

        if row_top + row_h > inner.bottom() {
            log::warn!(
                "Fabric panel full: {} of {} properties shown",
                out.iter().filter(|i| i.has_class(class::FABRIC_VALUE)).count(),
                visible.len()
            );
            break;
        }

        for (i, ((label, value), entry_h)) in chunk.iter().zip(heights.iter()).enumerate() {
            let x = inner.x + (col_w + m.fabric_gap_x) * i as f32;
            let value_h = entry_h - LABEL_LINE - LABEL_GAP - ENTRY_PADDING - 1.0;
            out.push(items::text(
                Rect::new(x, row_top, col_w, LABEL_LINE),
                &label.to_uppercase(),
                TextStyle::new(m.fabric_label_font, FontWeight::Bold, palette::ZINC_500).tracking_em(0.1),
                &[class::FABRIC_LABEL],
            ));
            out.push(items::text(
                Rect::new(x, row_top + LABEL_LINE + LABEL_GAP, col_w, value_h),
                value,
                TextStyle::new(m.fabric_value_font, FontWeight::Medium, palette::GRAY_100)
                    .line_height(1.5)
                    .wrapped(),
                &[class::FABRIC_VALUE],
            ));
            out.push(items::fill(
                Rect::new(x, row_top + entry_h - 1.0, col_w, 1.0),
                palette::ZINC_800,
                &[class::DIVIDER],
            ));
        }

        row_top += row_h + m.fabric_gap_y;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::html_layout::LayoutEngine;
    use crate::models::{CanvasFormat, FormState};

    #[test]
    fn test_estimate_lines_bounds() {
        assert_eq!(estimate_lines("", 20.0, 100.0), 1);
        assert_eq!(estimate_lines("short", 20.0, 400.0), 1);
        assert_eq!(estimate_lines(&"x".repeat(500), 20.0, 100.0), MAX_VALUE_LINES);
    }

    #[test]
    fn test_placeholder_when_no_values() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        // A key with an empty value still counts as "nothing to show"
        form.set_fabric_value("Composition", "");
        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
        assert_eq!(list.texts_with_class(class::FABRIC_EMPTY), vec!["No product details provided."]);
        assert_eq!(list.items_with_class(class::FABRIC_VALUE).count(), 0);
    }

    #[test]
    fn test_only_filled_properties_in_category_order() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        let props = config.default_category().fabric_properties.clone();
        form.set_fabric_value(&props[2], "Regular");
        form.set_fabric_value(&props[0], "100% Cotton");
        form.set_fabric_value("Not In Category", "ignored");

        for format in CanvasFormat::ALL {
            form.canvas_format = format;
            let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
            assert_eq!(list.texts_with_class(class::FABRIC_VALUE), vec!["100% Cotton", "Regular"]);
            assert_eq!(list.items_with_class(class::FABRIC_EMPTY).count(), 0);
        }
    }

    #[test]
    fn test_absent_properties_reserve_no_space() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        let props = config.default_category().fabric_properties.clone();
        form.set_fabric_value(&props[0], "A");
        form.set_fabric_value(&props[3], "B");

        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
        let labels: Vec<&DisplayItem> = list.items_with_class(class::FABRIC_LABEL).collect();
        assert_eq!(labels.len(), 2);

        // Portrait stacks entries: the second directly follows the first
        let first = labels[0].rect();
        let second = labels[1].rect();
        let metrics = crate::html_layout::LayoutMetrics::for_format(CanvasFormat::Portrait);
        let entry_h = LABEL_LINE + LABEL_GAP + (metrics.fabric_value_font * 1.5).round() + ENTRY_PADDING + 1.0;
        assert_eq!(second.y - first.y, entry_h + metrics.fabric_gap_y);
    }

    #[test]
    fn test_full_panel_drops_trailing_entries() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        let props = config.default_category().fabric_properties.clone();
        let long = "Very long value that wraps across several lines of the panel ".repeat(4);
        for prop in &props {
            form.set_fabric_value(prop, &long);
        }

        for format in CanvasFormat::ALL {
            form.canvas_format = format;
            let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
            let panel = *list.items_with_class(class::FABRIC_PANEL).next().unwrap().rect();
            let values: Vec<&DisplayItem> = list.items_with_class(class::FABRIC_VALUE).collect();
            assert!(values.len() <= props.len());
            for value in values {
                assert!(value.rect().bottom() <= panel.bottom());
            }
        }
    }
}
