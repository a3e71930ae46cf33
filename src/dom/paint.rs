//! Canvas2D painter for the export tree
//!
//! Paints a display list onto a `<canvas>` 1:1, following the same rules as
//! the software rasterizer: contain-fit images, single-line text centered in
//! its box, wrapped text from the top.

use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::display::FONT_FAMILY;
use crate::html_layout::{
    BlendMode, BorderStyle, BoxItem, Corners, DisplayItem, DisplayList, ImageItem, Rect, TextItem,
};
use crate::renderers::raster::contain_rect;
use crate::renderers::{first_line_top, line_start_x, tracked_width, wrap_words};

/// Trace a rectangle path with the selected corners rounded
fn rounded_path(ctx: &CanvasRenderingContext2d, rect: &Rect, radius: f32, corners: Corners) -> Result<(), JsValue> {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0) as f64;
    let (top, bottom) = match corners {
        Corners::All => (r, r),
        Corners::Top => (r, 0.0),
        Corners::Bottom => (0.0, r),
    };
    let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);

    ctx.begin_path();
    ctx.move_to(x + top, y);
    ctx.arc_to(x + w, y, x + w, y + h, top)?;
    ctx.arc_to(x + w, y + h, x, y + h, bottom)?;
    ctx.arc_to(x, y + h, x, y, bottom)?;
    ctx.arc_to(x, y, x + w, y, top)?;
    ctx.close_path();
    Ok(())
}

fn paint_box(ctx: &CanvasRenderingContext2d, item: &BoxItem) -> Result<(), JsValue> {
    if let Some(fill) = item.fill {
        ctx.set_fill_style(&JsValue::from_str(&fill.css()));
        rounded_path(ctx, &item.rect, item.radius, item.corners)?;
        ctx.fill();
    }
    if let Some(border) = &item.border {
        // Stroke is centered on the path; inset by half so it stays inside
        let half = border.width / 2.0;
        let inner = item.rect.inset(half);
        ctx.save();
        ctx.set_line_width(border.width as f64);
        ctx.set_stroke_style(&JsValue::from_str(&border.color.css()));
        let dash = match border.style {
            BorderStyle::Solid => js_sys::Array::new(),
            BorderStyle::Dashed => {
                let len = JsValue::from_f64((border.width * 3.0) as f64);
                js_sys::Array::of2(&len, &len)
            }
        };
        ctx.set_line_dash(&dash)?;
        rounded_path(ctx, &inner, (item.radius - half).max(0.0), item.corners)?;
        ctx.stroke();
        ctx.restore();
    }
    Ok(())
}

fn measure(ctx: &CanvasRenderingContext2d, text: &str) -> f32 {
    ctx.measure_text(text).map(|m| m.width() as f32).unwrap_or(0.0)
}

fn paint_text(ctx: &CanvasRenderingContext2d, item: &TextItem) -> Result<(), JsValue> {
    let style = &item.style;
    if item.text.trim().is_empty() {
        return Ok(());
    }
    ctx.save();
    ctx.begin_path();
    ctx.rect(
        item.rect.x as f64,
        item.rect.y as f64,
        item.rect.w as f64,
        item.rect.h as f64,
    );
    ctx.clip();
    ctx.set_font(&style.css_font(FONT_FAMILY));
    ctx.set_fill_style(&JsValue::from_str(&style.color.css()));
    ctx.set_text_baseline("middle");
    ctx.set_text_align("left");

    let measure_line = |s: &str| tracked_width(s, style.letter_spacing, |t| measure(ctx, t));
    let lines = if style.wrap {
        wrap_words(&item.text, item.rect.w, measure_line)
    } else {
        vec![item.text.clone()]
    };

    let line_h = style.line_height;
    let mut top = first_line_top(item.rect.y, item.rect.h, line_h, style.wrap);
    for (index, line) in lines.iter().enumerate() {
        if index > 0 && top + line_h > item.rect.bottom() + 0.5 {
            break;
        }
        let mut x = line_start_x(&item.rect, measure_line(line), style.align) as f64;
        let y = (top + line_h / 2.0) as f64;

        if style.letter_spacing == 0.0 {
            ctx.fill_text(line, x, y)?;
        } else {
            let mut buf = [0u8; 4];
            for ch in line.chars() {
                let glyph = ch.encode_utf8(&mut buf);
                ctx.fill_text(glyph, x, y)?;
                x += (measure(ctx, glyph) + style.letter_spacing) as f64;
            }
        }
        top += line_h;
    }
    ctx.restore();
    Ok(())
}

fn paint_image(ctx: &CanvasRenderingContext2d, item: &ImageItem, image: &HtmlImageElement) -> Result<(), JsValue> {
    let target = contain_rect(&item.rect, image.natural_width(), image.natural_height(), item.align);
    if target.w <= 0.0 || target.h <= 0.0 {
        return Ok(());
    }
    ctx.save();
    ctx.set_global_alpha(item.opacity as f64);
    if item.blend == BlendMode::Multiply {
        ctx.set_global_composite_operation("multiply")?;
    }
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        target.x as f64,
        target.y as f64,
        target.w as f64,
        target.h as f64,
    )?;
    ctx.restore();
    Ok(())
}

/// Paint a whole display list; every image must already be decoded
pub fn paint_list(
    ctx: &CanvasRenderingContext2d,
    list: &DisplayList,
    images: &HashMap<String, HtmlImageElement>,
) -> Result<(), JsValue> {
    ctx.set_fill_style(&JsValue::from_str(&list.background.css()));
    ctx.fill_rect(0.0, 0.0, list.width as f64, list.height as f64);

    for item in list.items() {
        match item {
            DisplayItem::Box(b) => paint_box(ctx, b)?,
            DisplayItem::Text(t) => paint_text(ctx, t)?,
            DisplayItem::Image(i) => {
                let image = images
                    .get(&i.src)
                    .ok_or_else(|| JsValue::from_str(&format!("image not loaded: {}", i.src)))?;
                paint_image(ctx, i, image)?;
            }
        }
    }
    Ok(())
}
