//! Scale-to-fit arithmetic
//!
//! The preview shows the fixed-size canvas uniformly scaled so it fits the
//! region it lives in. The scale is purely visual: it never feeds back into
//! layout or export.

use serde::{Deserialize, Serialize};

use crate::html_layout::DisplayList;
use crate::models::{CanvasFormat, PixelSize};

/// Margin kept around the canvas on each side of the region
pub const REGION_MARGIN: f64 = 20.0;

/// Measured size of the region hosting the preview, in CSS pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct RegionSize {
    pub width: f64,
    pub height: f64,
}

impl RegionSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Largest uniform scale that fits `canvas` inside `region` minus its margins
///
/// Never negative: a region smaller than its margins gives 0.
pub fn fit_scale(region: RegionSize, canvas: PixelSize) -> f64 {
    if canvas.width == 0 || canvas.height == 0 {
        return 0.0;
    }
    let avail_w = region.width - 2.0 * REGION_MARGIN;
    let avail_h = region.height - 2.0 * REGION_MARGIN;
    let scale_x = avail_w / canvas.width as f64;
    let scale_y = avail_h / canvas.height as f64;
    let s = scale_x.min(scale_y);
    if s.is_finite() {
        s.max(0.0)
    } else {
        0.0
    }
}

/// Keeps the current scale in step with the region and the active format
///
/// The last measured region is remembered so a format switch can recompute
/// immediately, without waiting for the next resize notification.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleController {
    format: CanvasFormat,
    region: Option<RegionSize>,
    scale: f64,
}

impl ScaleController {
    pub fn new(format: CanvasFormat) -> Self {
        Self {
            format,
            region: None,
            scale: 1.0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn format(&self) -> CanvasFormat {
        self.format
    }

    pub fn region(&self) -> Option<RegionSize> {
        self.region
    }

    /// Record a new region measurement; returns the new scale
    pub fn on_resize(&mut self, region: RegionSize) -> f64 {
        self.region = Some(region);
        self.recompute()
    }

    /// Switch format and recompute from the last measured region
    pub fn set_format(&mut self, format: CanvasFormat) -> f64 {
        self.format = format;
        self.recompute()
    }

    fn recompute(&mut self) -> f64 {
        if let Some(region) = self.region {
            let next = fit_scale(region, self.format.size());
            if next != self.scale {
                log::debug!(
                    "Scale {:.4} -> {:.4} (region {}x{}, format {})",
                    self.scale,
                    next,
                    region.width,
                    region.height,
                    self.format
                );
            }
            self.scale = next;
        }
        self.scale
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform { scale: self.scale }
    }
}

/// Visual transform applied to the display tree
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
}

impl ViewTransform {
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn css_origin(&self) -> &'static str {
        "center center"
    }
}

/// The on-screen tree: a display list plus the visual scale it is shown at
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayTree {
    pub list: DisplayList,
    pub transform: ViewTransform,
}

impl DisplayTree {
    pub fn new(list: DisplayList, scale: f64) -> Self {
        Self {
            list,
            transform: ViewTransform { scale },
        }
    }

    /// Logical size; unaffected by the scale
    pub fn logical_size(&self) -> PixelSize {
        self.list.size()
    }

    /// Size the tree occupies on screen
    pub fn visual_size(&self) -> (f64, f64) {
        let size = self.logical_size();
        (
            size.width as f64 * self.transform.scale,
            size.height as f64 * self.transform.scale,
        )
    }
}
