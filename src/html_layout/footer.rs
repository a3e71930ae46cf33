//! Footer band: website address on black

use super::display_list::*;
use super::document::LayoutContext;
use super::items;

pub fn layout_footer(ctx: &LayoutContext, band: Rect) -> Vec<DisplayItem> {
    let m = &ctx.metrics;
    let line_h = (m.footer_font * 1.2).round().min(band.h);
    vec![
        items::fill(band, palette::BLACK, &[class::FOOTER]),
        items::text(
            Rect::new(band.x, band.y + (band.h - line_h) / 2.0, band.w, line_h),
            ctx.form.website_url.trim(),
            TextStyle::new(m.footer_font, FontWeight::Light, palette::FOOTER_TEXT)
                .align(TextAlign::Center)
                .tracking_em(0.2),
            &[class::WEBSITE],
        ),
    ]
}
