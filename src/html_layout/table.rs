//! Measurement table
//!
//! One header row (measurement title + one column per selected size, or a
//! single placeholder column when no size is selected) and one row per
//! measurement of the active category.

use super::display_list::*;
use super::document::LayoutContext;
use super::items;

/// Total height of the table for the current category
pub fn table_height(ctx: &LayoutContext) -> f32 {
    let m = &ctx.metrics;
    let rows = 1 + ctx.category.measurements.len();
    rows as f32 * m.row_height + 2.0 * m.table_border
}

/// Lay out the table at the top of `area`, using its full width
///
/// Returns the table items; the table occupies `table_height(ctx)` pixels.
pub fn layout_table(ctx: &LayoutContext, area: Rect) -> Vec<DisplayItem> {
    let m = &ctx.metrics;
    let mut out = Vec::new();

    let outer = Rect::new(area.x, area.y, area.w, table_height(ctx));
    let content = outer.inset(m.table_border);
    let inner_radius = (m.table_radius - m.table_border).max(0.0);

    let sizes = ctx.form.selected_sizes.as_slice();
    let column_count = sizes.len().max(1);
    let name_w = content.w * m.name_column_share;
    let col_w = (content.w - name_w) / column_count as f32;
    let col_x = |i: usize| content.x + name_w + col_w * i as f32;
    let rows = ctx.category.measurements.len();

    // Header row
    let head = Rect::new(content.x, content.y, content.w, m.row_height);
    out.push(items::panel(
        head,
        Some(palette::BLACK),
        None,
        inner_radius,
        if rows == 0 { Corners::All } else { Corners::Top },
        &[class::TABLE_HEAD],
    ));
    out.push(items::text(
        Rect::new(head.x + m.table_padding_x, head.y, (name_w - m.table_padding_x).max(0.0), head.h),
        &ctx.labels.measurements_title.to_uppercase(),
        TextStyle::new(m.table_font, FontWeight::Bold, palette::WHITE).tracking_em(0.05),
        &[class::TABLE_TITLE],
    ));

    if sizes.is_empty() {
        out.push(items::text(
            Rect::new(col_x(0), head.y, col_w, head.h),
            &ctx.labels.select_size_placeholder,
            TextStyle::new(m.table_placeholder_font, FontWeight::Regular, palette::GRAY_400)
                .align(TextAlign::Center)
                .italic(),
            &[class::SIZE_PLACEHOLDER],
        ));
    } else {
        for (i, size) in sizes.iter().enumerate() {
            out.push(items::text(
                Rect::new(col_x(i), head.y, col_w, head.h),
                size,
                TextStyle::new(m.table_font, FontWeight::Bold, palette::WHITE).align(TextAlign::Center),
                &[class::SIZE_HEADER],
            ));
        }
    }
    push_column_lines(&mut out, head, name_w, col_w, sizes.len(), palette::GRAY_700, palette::GRAY_700);

    // Measurement rows
    for (idx, name) in ctx.category.measurements.iter().enumerate() {
        let row = Rect::new(
            content.x,
            content.y + m.row_height * (idx + 1) as f32,
            content.w,
            m.row_height,
        );
        let is_last = idx + 1 == rows;
        let (stripe, stripe_class) = if idx % 2 == 0 {
            (palette::WHITE, class::ROW_EVEN)
        } else {
            (palette::GRAY_50, class::ROW_ODD)
        };
        out.push(items::panel(
            row,
            Some(stripe),
            None,
            if is_last { inner_radius } else { 0.0 },
            Corners::Bottom,
            &[class::ROW, stripe_class],
        ));
        out.push(items::text(
            Rect::new(row.x + m.table_padding_x, row.y, (name_w - m.table_padding_x).max(0.0), row.h),
            name,
            TextStyle::new(m.table_font, FontWeight::SemiBold, palette::GRAY_800),
            &[class::MEASURE_NAME],
        ));

        if sizes.is_empty() {
            // Empty cell under the placeholder column
            out.push(items::text(
                Rect::new(col_x(0), row.y, col_w, row.h),
                "",
                TextStyle::new(m.table_font, FontWeight::Medium, palette::GRAY_700).align(TextAlign::Center),
                &[class::MEASURE_CELL],
            ));
        } else {
            for (i, size) in sizes.iter().enumerate() {
                let value = ctx
                    .form
                    .measurement(size, name)
                    .unwrap_or(ctx.labels.empty_value.as_str());
                out.push(items::text(
                    Rect::new(col_x(i), row.y, col_w, row.h),
                    value,
                    TextStyle::new(m.table_font, FontWeight::Medium, palette::GRAY_700)
                        .align(TextAlign::Center),
                    &[class::MEASURE_CELL],
                ));
            }
        }
        push_column_lines(&mut out, row, name_w, col_w, sizes.len(), palette::GRAY_200, palette::GRAY_100);
    }

    // Outline on top so row corners never cover it
    out.push(items::panel(
        outer,
        None,
        Some(Border {
            width: m.table_border,
            color: palette::GRAY_100,
            style: BorderStyle::Solid,
        }),
        m.table_radius,
        Corners::All,
        &[class::TABLE],
    ));

    out
}

/// Vertical 1px separators: after the name column, then between size columns
fn push_column_lines(
    out: &mut Vec<DisplayItem>,
    row: Rect,
    name_w: f32,
    col_w: f32,
    size_count: usize,
    name_line: Color,
    size_line: Color,
) {
    out.push(items::fill(
        Rect::new(row.x + name_w, row.y, 1.0, row.h),
        name_line,
        &[class::GRID_LINE],
    ));
    for i in 1..size_count {
        out.push(items::fill(
            Rect::new(row.x + name_w + col_w * i as f32, row.y, 1.0, row.h),
            size_line,
            &[class::GRID_LINE],
        ));
    }
}
