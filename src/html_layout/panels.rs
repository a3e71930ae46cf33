//! Silhouette and disclaimer panels

use super::display_list::*;
use super::document::LayoutContext;
use super::items;

pub fn layout_silhouette(ctx: &LayoutContext, rect: Rect) -> Vec<DisplayItem> {
    let m = &ctx.metrics;
    let mut out = vec![items::panel(
        rect,
        Some(palette::WHITE),
        Some(Border {
            width: m.silhouette_border,
            color: palette::GRAY_300,
            style: BorderStyle::Dashed,
        }),
        m.panel_radius,
        Corners::All,
        &[class::SILHOUETTE_PANEL],
    )];

    match ctx.category.silhouette() {
        Some(src) => out.push(items::image(
            rect.inset(m.silhouette_border + m.silhouette_padding),
            src,
            ImageAlign::Center,
            m.silhouette_opacity,
            BlendMode::Multiply,
            true,
            &[class::SILHOUETTE],
        )),
        None => {
            let line_h = (m.placeholder_font * 1.5).round().min(rect.h);
            out.push(items::text(
                Rect::new(rect.x, rect.y + (rect.h - line_h) / 2.0, rect.w, line_h),
                &ctx.labels.no_image_placeholder,
                TextStyle::new(m.placeholder_font, FontWeight::Medium, palette::GRAY_300)
                    .align(TextAlign::Center),
                &[class::SILHOUETTE_EMPTY],
            ));
        }
    }

    out
}

pub fn layout_disclaimer(ctx: &LayoutContext, rect: Rect) -> Vec<DisplayItem> {
    let m = &ctx.metrics;
    let mut out = vec![
        items::panel(
            rect,
            Some(palette::GRAY_100),
            None,
            m.disclaimer_radius,
            Corners::All,
            &[class::DISCLAIMER],
        ),
        items::panel(
            Rect::new(rect.x, rect.y, m.disclaimer_bar.min(rect.w), rect.h),
            Some(palette::BLACK),
            None,
            m.disclaimer_radius,
            Corners::All,
            &[class::DISCLAIMER_BAR],
        ),
    ];

    let text_rect = Rect::new(
        rect.x + m.disclaimer_bar + m.disclaimer_padding,
        rect.y,
        (rect.w - m.disclaimer_bar - 2.0 * m.disclaimer_padding).max(0.0),
        rect.h,
    )
    .inset_xy(0.0, (m.disclaimer_padding / 2.0).min(rect.h / 2.0));
    let text = format!("{} {}", ctx.labels.disclaimer_title, ctx.labels.disclaimer);
    out.push(items::text(
        text_rect,
        text.trim(),
        TextStyle::new(m.disclaimer_font, FontWeight::Medium, palette::GRAY_600)
            .line_height(1.4)
            .wrapped(),
        &[class::DISCLAIMER_TEXT],
    ));

    out
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::html_layout::{class, BlendMode, LayoutEngine};
    use crate::models::FormState;

    #[test]
    fn test_silhouette_image_for_category_with_image() {
        let config = AppConfig::builtin().unwrap();
        let form = FormState::for_config(&config);
        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);

        let image = list
            .items_with_class(class::SILHOUETTE)
            .find_map(|item| item.as_image())
            .unwrap();
        assert_eq!(image.src, "silhouettes/tshirt.png");
        assert_eq!(image.blend, BlendMode::Multiply);
        assert!(image.cross_origin);
        assert_eq!(list.items_with_class(class::SILHOUETTE_EMPTY).count(), 0);
    }

    #[test]
    fn test_placeholder_for_category_without_image() {
        let config = AppConfig::builtin().unwrap();
        let mut form = FormState::for_config(&config);
        form.selected_category_id = "dress".to_string();
        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);

        assert_eq!(list.items_with_class(class::SILHOUETTE).count(), 0);
        assert_eq!(list.texts_with_class(class::SILHOUETTE_EMPTY), vec!["No image"]);
    }

    #[test]
    fn test_disclaimer_text() {
        let config = AppConfig::builtin().unwrap();
        let form = FormState::for_config(&config);
        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
        let texts = list.texts_with_class(class::DISCLAIMER_TEXT);
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("Note: Measurements may vary"));
    }
}
