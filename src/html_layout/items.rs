//! Small constructors for display items used by the band builders

use super::display_list::*;

fn classes(names: &[&str]) -> Vec<String> {
    names.iter().map(|c| c.to_string()).collect()
}

/// Solid rectangle, no border, square corners
pub fn fill(rect: Rect, color: Color, class_names: &[&str]) -> DisplayItem {
    DisplayItem::Box(BoxItem {
        rect,
        fill: Some(color),
        border: None,
        radius: 0.0,
        corners: Corners::All,
        classes: classes(class_names),
    })
}

/// Rounded panel with optional fill and border
pub fn panel(
    rect: Rect,
    fill: Option<Color>,
    border: Option<Border>,
    radius: f32,
    corners: Corners,
    class_names: &[&str],
) -> DisplayItem {
    DisplayItem::Box(BoxItem {
        rect,
        fill,
        border,
        radius,
        corners,
        classes: classes(class_names),
    })
}

pub fn text(rect: Rect, content: &str, style: TextStyle, class_names: &[&str]) -> DisplayItem {
    DisplayItem::Text(TextItem {
        rect,
        text: content.to_string(),
        style,
        classes: classes(class_names),
    })
}

pub fn image(
    rect: Rect,
    src: &str,
    align: ImageAlign,
    opacity: f32,
    blend: BlendMode,
    cross_origin: bool,
    class_names: &[&str],
) -> DisplayItem {
    DisplayItem::Image(ImageItem {
        rect,
        src: src.to_string(),
        align,
        opacity,
        blend,
        cross_origin,
        classes: classes(class_names),
    })
}

