//! Body band: measurement table, fabric panel, silhouette and disclaimer
//!
//! Portrait stacks the table over a two-column row (fabric + disclaimer on
//! the left, silhouette on the right). Landscape puts table and fabric in a
//! wide left column and silhouette over disclaimer on the right.

use super::display_list::*;
use super::document::LayoutContext;
use super::metrics::LayoutMetrics;
use super::{fabric, items, panels, table};
use crate::models::CanvasFormat;

/// Regions of the body band, before anything is painted in them
#[derive(Clone, Debug, PartialEq)]
pub struct BodyRegions {
    pub table: Rect,
    pub fabric: Rect,
    pub silhouette: Rect,
    pub disclaimer: Rect,
}

/// Split the body band into its four regions
pub fn body_regions(m: &LayoutMetrics, band: Rect, table_h: f32) -> BodyRegions {
    let inner = band.inset(m.body_padding);

    match m.format {
        CanvasFormat::Portrait => {
            let table = Rect::new(inner.x, inner.y, inner.w, table_h);
            let row_top = table.bottom() + m.stack_gap;
            let row_h = (inner.bottom() - row_top).max(0.0);
            let left_w = ((inner.w - m.column_gap) * m.primary_share).round();
            let right_x = inner.x + left_w + m.column_gap;

            let fabric_h = (row_h - m.disclaimer_gap - m.disclaimer_height).max(0.0);
            BodyRegions {
                table,
                fabric: Rect::new(inner.x, row_top, left_w, fabric_h),
                silhouette: Rect::new(right_x, row_top, inner.right() - right_x, row_h),
                disclaimer: Rect::new(
                    inner.x,
                    row_top + fabric_h + m.disclaimer_gap,
                    left_w,
                    m.disclaimer_height.min(row_h),
                ),
            }
        }
        CanvasFormat::Landscape => {
            let left_w = ((inner.w - m.column_gap) * m.primary_share).round();
            let right_x = inner.x + left_w + m.column_gap;
            let right_w = inner.right() - right_x;

            let table = Rect::new(inner.x, inner.y, left_w, table_h);
            let fabric_top = table.bottom() + m.stack_gap;
            let silhouette_h = (inner.h - m.disclaimer_gap - m.disclaimer_height).max(0.0);
            BodyRegions {
                table,
                fabric: Rect::new(inner.x, fabric_top, left_w, (inner.bottom() - fabric_top).max(0.0)),
                silhouette: Rect::new(right_x, inner.y, right_w, silhouette_h),
                disclaimer: Rect::new(
                    right_x,
                    inner.y + silhouette_h + m.disclaimer_gap,
                    right_w,
                    m.disclaimer_height.min(inner.h),
                ),
            }
        }
    }
}

pub fn layout_body(ctx: &LayoutContext, band: Rect) -> Vec<DisplayItem> {
    let regions = body_regions(&ctx.metrics, band, table::table_height(ctx));
    let mut out = vec![items::fill(band, palette::WHITE, &[class::BODY])];

    out.extend(table::layout_table(ctx, regions.table));
    out.extend(fabric::layout_fabric_panel(ctx, regions.fabric));
    out.extend(panels::layout_silhouette(ctx, regions.silhouette));
    out.extend(panels::layout_disclaimer(ctx, regions.disclaimer));
    out
}
