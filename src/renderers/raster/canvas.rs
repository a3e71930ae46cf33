//! RGB pixel surface with the few primitives the chart needs

use image::{Rgb, RgbImage};

use crate::html_layout::{Border, BorderStyle, Color, Corners, Rect};

/// Opaque RGB surface, origin top-left
#[derive(Debug)]
pub struct RgbCanvas {
    image: RgbImage,
}

impl RgbCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb([background.r, background.g, background.b])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Source-over blend, `alpha` in 0..=1
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || alpha <= 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }
        let a = alpha.min(1.0);
        let px = self.image.get_pixel_mut(x, y);
        for (dst, src) in px.0.iter_mut().zip(color) {
            *dst = (src as f32 * a + *dst as f32 * (1.0 - a)).round() as u8;
        }
    }

    /// Multiply blend: the result is never lighter than what is underneath
    pub fn multiply_pixel(&mut self, x: i32, y: i32, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(under) = self.pixel(x as u32, y as u32) else {
            return;
        };
        let product = [
            (under[0] as u16 * color[0] as u16 / 255) as u8,
            (under[1] as u16 * color[1] as u16 / 255) as u8,
            (under[2] as u16 * color[2] as u16 / 255) as u8,
        ];
        self.blend_pixel(x, y, product, alpha);
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.fill_rounded(rect, 0.0, Corners::All, color);
    }

    /// Fill a rectangle whose selected corners are rounded
    pub fn fill_rounded(&mut self, rect: &Rect, radius: f32, corners: Corners, color: Color) {
        let rgb = [color.r, color.g, color.b];
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                if inside_rounded(rect, radius, corners, cx, cy) {
                    self.blend_pixel(px, py, rgb, 1.0);
                }
            }
        }
    }

    /// Stroke a border inside `rect` (CSS border-box)
    pub fn stroke_border(&mut self, rect: &Rect, border: &Border, radius: f32, corners: Corners) {
        let rgb = [border.color.r, border.color.g, border.color.b];
        let inner = rect.inset(border.width);
        let inner_radius = (radius - border.width).max(0.0);
        let dash = (border.width * 3.0).max(1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                if !inside_rounded(rect, radius, corners, cx, cy)
                    || inside_rounded(&inner, inner_radius, corners, cx, cy)
                {
                    continue;
                }
                if border.style == BorderStyle::Dashed {
                    // Horizontal edges dash along x, vertical edges along y
                    let on_horizontal = cy < inner.y || cy >= inner.bottom();
                    let along = if on_horizontal { cx - rect.x } else { cy - rect.y };
                    if (along / dash).floor() as i64 % 2 == 1 {
                        continue;
                    }
                }
                self.blend_pixel(px, py, rgb, 1.0);
            }
        }
    }

    /// Integer pixel bounds of `rect`, clipped to the canvas
    fn pixel_span(&self, rect: &Rect) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.round().max(0.0) as i32;
        let y0 = rect.y.round().max(0.0) as i32;
        let x1 = (rect.right().round() as i32).min(self.width() as i32);
        let y1 = (rect.bottom().round() as i32).min(self.height() as i32);
        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }
}

/// Point-in-rounded-rect test for pixel centers
fn inside_rounded(rect: &Rect, radius: f32, corners: Corners, x: f32, y: f32) -> bool {
    if x < rect.x || y < rect.y || x > rect.right() || y > rect.bottom() {
        return false;
    }
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
    if r <= 0.0 {
        return true;
    }
    let round_top = matches!(corners, Corners::All | Corners::Top);
    let round_bottom = matches!(corners, Corners::All | Corners::Bottom);

    let cx = if x < rect.x + r {
        rect.x + r
    } else if x > rect.right() - r {
        rect.right() - r
    } else {
        return true;
    };
    let cy = if y < rect.y + r && round_top {
        rect.y + r
    } else if y > rect.bottom() - r && round_bottom {
        rect.bottom() - r
    } else {
        return true;
    };
    (x - cx).powi(2) + (y - cy).powi(2) <= r * r
}
