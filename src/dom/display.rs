//! DOM rendering of display lists
//!
//! Every display item becomes one absolutely positioned element inside a
//! canvas `<div>` sized to the logical canvas. The on-screen copy carries the
//! scale transform; the export copy does not.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::html_layout::{
    BorderStyle, BoxItem, Corners, DisplayItem, DisplayList, ImageAlign, ImageItem, BlendMode, Rect, TextItem,
};
use crate::viewport::{DisplayTree, ViewTransform};

/// Font stack used for every text run
pub const FONT_FAMILY: &str = "'Poppins', sans-serif";

const CANVAS_CLASS: &str = "sc-canvas";

fn px(value: f32) -> String {
    format!("{}px", value)
}

fn set_styles(element: &HtmlElement, styles: &[(&str, String)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

fn positioned(document: &Document, tag: &str, rect: &Rect, classes: &[String]) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = document.create_element(tag)?.dyn_into()?;
    element.set_class_name(&classes.join(" "));
    set_styles(
        &element,
        &[
            ("position", "absolute".to_string()),
            ("left", px(rect.x)),
            ("top", px(rect.y)),
            ("width", px(rect.w)),
            ("height", px(rect.h)),
            ("box-sizing", "border-box".to_string()),
        ],
    )?;
    Ok(element)
}

fn corner_radii(radius: f32, corners: Corners) -> [String; 4] {
    let r = px(radius);
    let zero = "0".to_string();
    match corners {
        Corners::All => [r.clone(), r.clone(), r.clone(), r],
        Corners::Top => [r.clone(), r, zero.clone(), zero],
        Corners::Bottom => [zero.clone(), zero, r.clone(), r],
    }
}

fn box_element(document: &Document, item: &BoxItem) -> Result<HtmlElement, JsValue> {
    let element = positioned(document, "div", &item.rect, &item.classes)?;
    let mut styles = Vec::new();
    if let Some(fill) = item.fill {
        styles.push(("background-color", fill.css()));
    }
    if let Some(border) = &item.border {
        let kind = match border.style {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
        };
        styles.push(("border", format!("{}px {} {}", border.width, kind, border.color.css())));
    }
    if item.radius > 0.0 {
        let [tl, tr, br, bl] = corner_radii(item.radius, item.corners);
        styles.push(("border-top-left-radius", tl));
        styles.push(("border-top-right-radius", tr));
        styles.push(("border-bottom-right-radius", br));
        styles.push(("border-bottom-left-radius", bl));
    }
    set_styles(&element, &styles)?;
    Ok(element)
}

fn text_element(document: &Document, item: &TextItem) -> Result<HtmlElement, JsValue> {
    let element = positioned(document, "div", &item.rect, &item.classes)?;
    let style = &item.style;
    let mut styles = vec![
        ("font", style.css_font(FONT_FAMILY)),
        ("color", style.color.css()),
        ("text-align", style.align.css().to_string()),
        ("letter-spacing", px(style.letter_spacing)),
        ("line-height", px(style.line_height)),
        ("overflow", "hidden".to_string()),
    ];
    if style.wrap {
        styles.push(("white-space", "normal".to_string()));
        styles.push(("overflow-wrap", "break-word".to_string()));
    } else {
        // Single line, centered vertically in its box
        styles.push(("white-space", "nowrap".to_string()));
        styles.push(("padding-top", px(((item.rect.h - style.line_height) / 2.0).max(0.0))));
    }
    set_styles(&element, &styles)?;
    element.set_text_content(Some(&item.text));
    Ok(element)
}

fn image_element(document: &Document, item: &ImageItem) -> Result<HtmlElement, JsValue> {
    let element = positioned(document, "img", &item.rect, &item.classes)?;
    if item.cross_origin {
        element.set_attribute("crossorigin", "anonymous")?;
    }
    element.set_attribute("alt", "")?;
    element.set_attribute("src", &item.src)?;
    let position = match item.align {
        ImageAlign::Start => "left center",
        ImageAlign::Center => "center center",
    };
    let blend = match item.blend {
        BlendMode::Normal => "normal",
        BlendMode::Multiply => "multiply",
    };
    set_styles(
        &element,
        &[
            ("object-fit", "contain".to_string()),
            ("object-position", position.to_string()),
            ("opacity", item.opacity.to_string()),
            ("mix-blend-mode", blend.to_string()),
        ],
    )?;
    Ok(element)
}

/// Build the canvas element for a display list, without any transform
pub fn build_canvas(document: &Document, list: &DisplayList) -> Result<HtmlElement, JsValue> {
    let canvas: HtmlElement = document.create_element("div")?.dyn_into()?;
    canvas.set_class_name(&format!("{} {}-{}", CANVAS_CLASS, CANVAS_CLASS, list.format));
    set_styles(
        &canvas,
        &[
            ("position", "relative".to_string()),
            ("width", format!("{}px", list.width)),
            ("height", format!("{}px", list.height)),
            ("flex-shrink", "0".to_string()),
            ("overflow", "hidden".to_string()),
            ("background-color", list.background.css()),
        ],
    )?;

    for item in list.items() {
        let element = match item {
            DisplayItem::Box(b) => box_element(document, b)?,
            DisplayItem::Text(t) => text_element(document, t)?,
            DisplayItem::Image(i) => image_element(document, i)?,
        };
        canvas.append_child(&element)?;
    }
    Ok(canvas)
}

pub fn apply_transform(canvas: &HtmlElement, transform: ViewTransform) -> Result<(), JsValue> {
    set_styles(
        canvas,
        &[
            ("transform", transform.css_transform()),
            ("transform-origin", transform.css_origin().to_string()),
        ],
    )
}

/// The on-screen preview inside its region
pub struct DisplayView {
    document: Document,
    region: HtmlElement,
    canvas: Option<HtmlElement>,
}

impl DisplayView {
    pub fn new(document: Document, region: HtmlElement) -> Self {
        Self {
            document,
            region,
            canvas: None,
        }
    }

    pub fn region(&self) -> &HtmlElement {
        &self.region
    }

    /// Replace the rendered canvas with a fresh tree
    pub fn render(&mut self, tree: &DisplayTree) -> Result<(), JsValue> {
        let canvas = build_canvas(&self.document, &tree.list)?;
        apply_transform(&canvas, tree.transform)?;
        match self.canvas.take() {
            Some(old) => {
                self.region.replace_child(&canvas, &old)?;
            }
            None => {
                self.region.append_child(&canvas)?;
            }
        }
        self.canvas = Some(canvas);
        Ok(())
    }

    /// Update only the scale of the current canvas
    pub fn set_transform(&self, transform: ViewTransform) -> Result<(), JsValue> {
        match &self.canvas {
            Some(canvas) => apply_transform(canvas, transform),
            None => Ok(()),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
    }
}
