//! Canvas formats supported by the chart
//!
//! Each format is a fixed resolution preset. The logical canvas, the layout
//! arrangement and the exported image size all follow the active format:
//! - Portrait: 1200 x 1800
//! - Landscape: 1800 x 1200

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exact pixel dimensions of a canvas or an exported image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasFormat {
    #[default]
    Portrait,
    Landscape,
}

impl CanvasFormat {
    pub const ALL: [CanvasFormat; 2] = [CanvasFormat::Portrait, CanvasFormat::Landscape];

    /// Fixed logical canvas dimensions for this format
    pub const fn size(&self) -> PixelSize {
        match self {
            CanvasFormat::Portrait => PixelSize::new(1200, 1800),
            CanvasFormat::Landscape => PixelSize::new(1800, 1200),
        }
    }

    /// Name used in file names and serialized state
    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasFormat::Portrait => "portrait",
            CanvasFormat::Landscape => "landscape",
        }
    }

    pub fn is_landscape(&self) -> bool {
        matches!(self, CanvasFormat::Landscape)
    }

    /// The other format
    pub fn toggled(&self) -> Self {
        match self {
            CanvasFormat::Portrait => CanvasFormat::Landscape,
            CanvasFormat::Landscape => CanvasFormat::Portrait,
        }
    }
}

/// Entry of the format toggle shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOption {
    pub value: CanvasFormat,
    pub label: String,
    /// e.g. "1200x1800"
    pub dimensions: String,
}

impl CanvasFormat {
    /// Human label for the toggle
    pub fn label(&self) -> &'static str {
        match self {
            CanvasFormat::Portrait => "Portrait",
            CanvasFormat::Landscape => "Landscape",
        }
    }

    /// Toggle entries for every format, portrait first
    pub fn options() -> Vec<FormatOption> {
        Self::ALL
            .iter()
            .map(|format| FormatOption {
                value: *format,
                label: format.label().to_string(),
                dimensions: format.size().to_string(),
            })
            .collect()
    }
}

impl fmt::Display for CanvasFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanvasFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" | "vertical" => Ok(CanvasFormat::Portrait),
            "landscape" | "horizontal" => Ok(CanvasFormat::Landscape),
            _ => Err(format!("Invalid canvas format: '{}'. Expected 'portrait' or 'landscape'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_options() {
        let options = CanvasFormat::options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].dimensions, "1200x1800");
        assert_eq!(options[1].label, "Landscape");
        assert_eq!(options[1].value, CanvasFormat::Landscape);
    }

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(CanvasFormat::Portrait.size(), PixelSize::new(1200, 1800));
        assert_eq!(CanvasFormat::Landscape.size(), PixelSize::new(1800, 1200));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("portrait".parse::<CanvasFormat>().unwrap(), CanvasFormat::Portrait);
        assert_eq!(" Landscape ".parse::<CanvasFormat>().unwrap(), CanvasFormat::Landscape);
        assert!("square".parse::<CanvasFormat>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CanvasFormat::Landscape).unwrap();
        assert_eq!(json, "\"landscape\"");
        let back: CanvasFormat = serde_json::from_str("\"portrait\"").unwrap();
        assert_eq!(back, CanvasFormat::Portrait);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(CanvasFormat::Portrait.toggled().toggled(), CanvasFormat::Portrait);
        assert!(CanvasFormat::Portrait.toggled().is_landscape());
    }

    #[test]
    fn test_pixel_size_display() {
        assert_eq!(CanvasFormat::Portrait.size().to_string(), "1200x1800");
    }
}
