//! Header band: branding and category title on the left, model code on the right

use super::display_list::*;
use super::document::LayoutContext;
use super::items;

/// Gap between the logo block and the category title
const TITLE_GAP: f32 = 16.0;
/// Gap between the model code block and the branding block
const BLOCK_GAP: f32 = 40.0;

pub fn layout_header(ctx: &LayoutContext, band: Rect) -> Vec<DisplayItem> {
    let m = &ctx.metrics;
    let mut out = Vec::new();

    out.push(items::fill(band, palette::WHITE, &[class::HEADER]));
    out.push(items::fill(
        Rect::new(band.x, band.bottom() - m.header_rule, band.w, m.header_rule),
        palette::BLACK,
        &[class::HEADER_RULE],
    ));

    let content_h = band.h - m.header_rule;
    let left_x = band.x + m.header_padding_x;
    let right_x = band.right() - m.header_padding_x - m.model_block_width;
    let left_w = (right_x - BLOCK_GAP - left_x).max(0.0);

    // Branding block: logo (or brand name) above the category title
    let title_h = (m.category_font * 1.2).round();
    let block_h = m.logo_height + TITLE_GAP + title_h;
    let top = band.y + ((content_h - block_h) / 2.0).max(0.0);

    let logo_rect = Rect::new(left_x, top, left_w.min(m.logo_max_width), m.logo_height);
    match ctx.form.logo() {
        Some(src) => out.push(items::image(
            logo_rect,
            src,
            ImageAlign::Start,
            1.0,
            BlendMode::Normal,
            false,
            &[class::LOGO],
        )),
        None => out.push(items::text(
            Rect::new(left_x, top, left_w, m.logo_height),
            &ctx.form.brand_name,
            TextStyle::new(m.brand_font, FontWeight::ExtraBold, palette::BLACK).tracking_em(0.1),
            &[class::BRAND_NAME],
        )),
    }

    let title = format!(
        "{} {}",
        ctx.category.label.to_uppercase(),
        ctx.labels.size_chart_suffix
    );
    out.push(items::text(
        Rect::new(left_x, top + m.logo_height + TITLE_GAP, left_w, title_h),
        title.trim(),
        TextStyle::new(m.category_font, FontWeight::Medium, palette::GRAY_500).tracking_em(0.2),
        &[class::CATEGORY_TITLE],
    ));

    // Model code block, right aligned
    let caption_h = (m.caption_font * 1.4).round();
    let code_gap = 8.0;
    let code_h = m.model_code_font;
    let model_top = band.y + ((content_h - (caption_h + code_gap + code_h)) / 2.0).max(0.0);

    out.push(items::text(
        Rect::new(right_x, model_top, m.model_block_width, caption_h),
        &ctx.labels.model_code_caption.to_uppercase(),
        TextStyle::new(m.caption_font, FontWeight::Bold, palette::GRAY_500)
            .align(TextAlign::Right)
            .tracking_em(0.1),
        &[class::MODEL_CAPTION],
    ));
    out.push(items::text(
        Rect::new(right_x, model_top + caption_h + code_gap, m.model_block_width, code_h),
        ctx.form.model_code().unwrap_or(ctx.labels.empty_value.as_str()),
        TextStyle::new(m.model_code_font, FontWeight::Black, palette::BLACK)
            .align(TextAlign::Right)
            .tracking_em(-0.05),
        &[class::MODEL_CODE],
    ));

    out
}
