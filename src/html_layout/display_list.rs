//! Display List for the size chart canvas
//!
//! This module defines the output of the layout engine. A DisplayList holds
//! every pre-calculated position, dimension, color and class needed to draw
//! the chart, whether into the DOM (the on-screen display tree) or onto an
//! export surface. Consumers never compute layout themselves.
//!
//! All coordinates are logical canvas pixels with the origin at the top-left
//! corner of the canvas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{CanvasFormat, PixelSize};

/// Class names attached to display items
///
/// The DOM renderer emits them verbatim; tests use them to find items.
pub mod class {
    pub const HEADER: &str = "sc-header";
    pub const HEADER_RULE: &str = "sc-header-rule";
    pub const LOGO: &str = "sc-logo";
    pub const BRAND_NAME: &str = "sc-brand-name";
    pub const CATEGORY_TITLE: &str = "sc-category-title";
    pub const MODEL_CAPTION: &str = "sc-model-caption";
    pub const MODEL_CODE: &str = "sc-model-code";

    pub const BODY: &str = "sc-body";
    pub const TABLE: &str = "sc-table";
    pub const TABLE_HEAD: &str = "sc-table-head";
    pub const TABLE_TITLE: &str = "sc-table-title";
    pub const SIZE_HEADER: &str = "sc-size-header";
    pub const SIZE_PLACEHOLDER: &str = "sc-size-placeholder";
    pub const ROW: &str = "sc-row";
    pub const ROW_EVEN: &str = "sc-row-even";
    pub const ROW_ODD: &str = "sc-row-odd";
    pub const MEASURE_NAME: &str = "sc-measure-name";
    pub const MEASURE_CELL: &str = "sc-measure-cell";
    pub const GRID_LINE: &str = "sc-grid-line";

    pub const FABRIC_PANEL: &str = "sc-fabric-panel";
    pub const FABRIC_TITLE: &str = "sc-fabric-title";
    pub const FABRIC_LABEL: &str = "sc-fabric-label";
    pub const FABRIC_VALUE: &str = "sc-fabric-value";
    pub const FABRIC_EMPTY: &str = "sc-fabric-empty";
    pub const DIVIDER: &str = "sc-divider";

    pub const SILHOUETTE_PANEL: &str = "sc-silhouette-panel";
    pub const SILHOUETTE: &str = "sc-silhouette";
    pub const SILHOUETTE_EMPTY: &str = "sc-silhouette-empty";
    pub const DISCLAIMER: &str = "sc-disclaimer";
    pub const DISCLAIMER_BAR: &str = "sc-disclaimer-bar";
    pub const DISCLAIMER_TEXT: &str = "sc-disclaimer-text";

    pub const FOOTER: &str = "sc-footer";
    pub const WEBSITE: &str = "sc-website";
}

/// An RGB color, serialized as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const BLACK: Color = Color::hex(0x000000);

    /// CSS color string
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.strip_prefix('#').unwrap_or(&value);
        if hex.len() != 6 {
            return Err(format!("Invalid color '{}': expected #rrggbb", value));
        }
        u32::from_str_radix(hex, 16)
            .map(Color::hex)
            .map_err(|_| format!("Invalid color '{}': expected #rrggbb", value))
    }
}

/// Palette used by the chart (Tailwind-like neutrals)
pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::WHITE;
    pub const BLACK: Color = Color::BLACK;
    pub const GRAY_50: Color = Color::hex(0xF9FAFB);
    pub const GRAY_100: Color = Color::hex(0xF3F4F6);
    pub const GRAY_200: Color = Color::hex(0xE5E7EB);
    pub const GRAY_300: Color = Color::hex(0xD1D5DB);
    pub const GRAY_400: Color = Color::hex(0x9CA3AF);
    pub const GRAY_500: Color = Color::hex(0x6B7280);
    pub const GRAY_600: Color = Color::hex(0x4B5563);
    pub const GRAY_700: Color = Color::hex(0x374151);
    pub const GRAY_800: Color = Color::hex(0x1F2937);
    pub const ZINC_400: Color = Color::hex(0xA1A1AA);
    pub const ZINC_500: Color = Color::hex(0x71717A);
    pub const ZINC_600: Color = Color::hex(0x52525B);
    pub const ZINC_700: Color = Color::hex(0x3F3F46);
    pub const ZINC_800: Color = Color::hex(0x27272A);
    pub const ZINC_900: Color = Color::hex(0x18181B);
    /// White at 80% over black, as printed in the footer
    pub const FOOTER_TEXT: Color = Color::hex(0xCCCCCC);
}

/// Axis-aligned rectangle in logical canvas pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrink by the same amount on every side
    pub fn inset(&self, amount: f32) -> Rect {
        self.inset_xy(amount, amount)
    }

    pub fn inset_xy(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            w: (self.w - 2.0 * dx).max(0.0),
            h: (self.h - 2.0 * dy).max(0.0),
        }
    }

    /// True if `other` lies entirely inside this rectangle (with a small epsilon)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f32 = 0.01;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Which corners of a box are rounded
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Corners {
    #[default]
    All,
    Top,
    Bottom,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    Solid,
    Dashed,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub style: BorderStyle,
}

/// A filled and/or bordered rectangle
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoxItem {
    pub rect: Rect,
    pub fill: Option<Color>,
    pub border: Option<Border>,
    /// Corner radius in pixels (0 = square)
    pub radius: f32,
    #[serde(default)]
    pub corners: Corners,
    pub classes: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Numeric CSS weight
    pub fn css(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
        }
    }

    pub fn is_bold(&self) -> bool {
        *self >= FontWeight::SemiBold
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font and paragraph settings for a text run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
    #[serde(default)]
    pub italic: bool,
    /// Extra advance after every character, in pixels
    #[serde(default)]
    pub letter_spacing: f32,
    /// Line box height in pixels
    pub line_height: f32,
    /// Wrap at word boundaries inside the rect (otherwise a single clipped line)
    #[serde(default)]
    pub wrap: bool,
}

impl TextStyle {
    pub fn new(size: f32, weight: FontWeight, color: Color) -> Self {
        Self {
            size,
            weight,
            color,
            align: TextAlign::Left,
            italic: false,
            letter_spacing: 0.0,
            line_height: size,
            wrap: false,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Letter spacing expressed in em, like CSS `tracking`
    pub fn tracking_em(mut self, em: f32) -> Self {
        self.letter_spacing = self.size * em;
        self
    }

    pub fn line_height(mut self, factor: f32) -> Self {
        self.line_height = self.size * factor;
        self
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// CSS `font` shorthand for a family
    pub fn css_font(&self, family: &str) -> String {
        format!(
            "{}{} {}px {}",
            if self.italic { "italic " } else { "" },
            self.weight.css(),
            self.size,
            family
        )
    }
}

/// A positioned run of text
///
/// Text is centered vertically inside `rect` and aligned horizontally per the
/// style. Case transforms are already applied to `text`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextItem {
    pub rect: Rect,
    pub text: String,
    pub style: TextStyle,
    pub classes: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ImageAlign {
    Start,
    Center,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    Normal,
    Multiply,
}

/// An image scaled to fit (contain) inside its rect
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageItem {
    pub rect: Rect,
    /// URL or data URL
    pub src: String,
    pub align: ImageAlign,
    pub opacity: f32,
    pub blend: BlendMode,
    /// Load with anonymous CORS so the export surface stays untainted
    pub cross_origin: bool,
    pub classes: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplayItem {
    Box(BoxItem),
    Text(TextItem),
    Image(ImageItem),
}

impl DisplayItem {
    pub fn rect(&self) -> &Rect {
        match self {
            DisplayItem::Box(b) => &b.rect,
            DisplayItem::Text(t) => &t.rect,
            DisplayItem::Image(i) => &i.rect,
        }
    }

    pub fn classes(&self) -> &[String] {
        match self {
            DisplayItem::Box(b) => &b.classes,
            DisplayItem::Text(t) => &t.classes,
            DisplayItem::Image(i) => &i.classes,
        }
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes().iter().any(|c| c == name)
    }

    pub fn as_text(&self) -> Option<&TextItem> {
        match self {
            DisplayItem::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageItem> {
        match self {
            DisplayItem::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxItem> {
        match self {
            DisplayItem::Box(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BandKind {
    Header,
    Body,
    Footer,
}

/// One of the three vertical bands of the canvas
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Band {
    pub kind: BandKind,
    pub rect: Rect,
    /// Items in paint order
    pub items: Vec<DisplayItem>,
}

/// Top-level display list for one canvas
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub format: CanvasFormat,
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Header, body, footer (in that order)
    pub bands: Vec<Band>,
}

impl DisplayList {
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    pub fn band(&self, kind: BandKind) -> Option<&Band> {
        self.bands.iter().find(|b| b.kind == kind)
    }

    /// All items in paint order
    pub fn items(&self) -> impl Iterator<Item = &DisplayItem> {
        self.bands.iter().flat_map(|band| band.items.iter())
    }

    pub fn items_with_class<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DisplayItem> + 'a {
        self.items().filter(move |item| item.has_class(name))
    }

    /// Texts of all text items carrying a class, in paint order
    pub fn texts_with_class(&self, name: &str) -> Vec<&str> {
        self.items()
            .filter(|item| item.has_class(name))
            .filter_map(DisplayItem::as_text)
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Distinct image sources, in paint order
    pub fn image_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for image in self.items().filter_map(DisplayItem::as_image) {
            if !sources.contains(&image.src.as_str()) {
                sources.push(&image.src);
            }
        }
        sources
    }

    /// Canonical JSON form; equal lists give identical strings
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
