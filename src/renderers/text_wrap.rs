//! Word wrapping and line placement shared by the export painters
//!
//! Both the Canvas2D painter and the software rasterizer wrap text the same
//! way; only the measuring function differs.

use crate::html_layout::{Rect, TextAlign};

/// Break `text` into lines no wider than `max_width`
///
/// Breaks happen at whitespace. A single word wider than the line is kept
/// whole on its own line rather than split mid-word.
pub fn wrap_words(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

/// Left edge of a line of `width` inside a box
///
/// A line wider than its box starts at the left edge whatever its alignment,
/// the way CSS places overflowing inline content.
pub fn line_start_x(rect: &Rect, width: f32, align: TextAlign) -> f32 {
    if width > rect.w {
        return rect.x;
    }
    match align {
        TextAlign::Left => rect.x,
        TextAlign::Center => rect.x + (rect.w - width) / 2.0,
        TextAlign::Right => rect.right() - width,
    }
}

/// Width of `text` with extra spacing after every character
pub fn tracked_width(text: &str, letter_spacing: f32, measure: impl Fn(&str) -> f32) -> f32 {
    measure(text) + letter_spacing * text.chars().count() as f32
}

/// Top of the first line box inside a text rect
///
/// Single-line text is centered vertically; wrapped text starts at the top.
pub fn first_line_top(rect_y: f32, rect_h: f32, line_height: f32, wrap: bool) -> f32 {
    if wrap {
        rect_y
    } else {
        rect_y + (rect_h - line_height) / 2.0
    }
}
