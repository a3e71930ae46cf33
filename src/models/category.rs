//! Product category definitions
//!
//! A category fixes which measurement rows and fabric properties a chart can
//! show. Categories are supplied by the surrounding application as immutable
//! configuration.

use serde::{Deserialize, Serialize};

/// A product category (e.g. t-shirt, trousers)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    /// Stable identifier, also used as the export filename fallback
    pub id: String,

    /// Display label printed in the chart header
    pub label: String,

    /// Measurement names, in table row order
    #[serde(default)]
    pub measurements: Vec<String>,

    /// Fabric property names, in panel order
    #[serde(default)]
    pub fabric_properties: Vec<String>,

    /// Optional silhouette image (URL or data URL)
    #[serde(default)]
    pub silhouette_image: Option<String>,
}

impl CategoryDefinition {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            measurements: Vec::new(),
            fabric_properties: Vec::new(),
            silhouette_image: None,
        }
    }

    pub fn with_measurements(mut self, names: &[&str]) -> Self {
        self.measurements = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_fabric_properties(mut self, names: &[&str]) -> Self {
        self.fabric_properties = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_silhouette(mut self, src: &str) -> Self {
        self.silhouette_image = Some(src.to_string());
        self
    }

    /// Silhouette reference, treating a blank string as absent
    pub fn silhouette(&self) -> Option<&str> {
        self.silhouette_image
            .as_deref()
            .map(str::trim)
            .filter(|src| !src.is_empty())
    }
}
