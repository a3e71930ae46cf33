//! Application configuration
//!
//! `AppConfig` is the immutable catalogue the chart is built from: the brand
//! name, the product categories and every fixed string printed on the canvas.
//! It can be supplied as JSON (from JavaScript) or YAML; a default catalogue
//! is embedded at compile time.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::CategoryDefinition;

const BUILTIN_CONFIG: &str = include_str!("../config/default_config.yaml");

/// Configuration loading/validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Input could not be parsed
    #[error("Invalid configuration: {0}")]
    Parse(String),

    /// The catalogue has no categories
    #[error("Configuration must define at least one category")]
    NoCategories,

    /// Two categories share an id
    #[error("Duplicate category id: '{0}'")]
    DuplicateCategory(String),

    /// A category id is blank
    #[error("Category '{0}' has an empty id")]
    EmptyCategoryId(String),
}

/// Fixed strings printed on the chart
///
/// Defaults are English; a catalogue may override any of them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartLabels {
    /// Appended to the category label in the header ("T-SHIRT SIZE CHART")
    pub size_chart_suffix: String,
    pub model_code_caption: String,
    /// Title of the measurement name column
    pub measurements_title: String,
    /// Single table column shown while no size is selected
    pub select_size_placeholder: String,
    pub product_details_title: String,
    pub no_details_placeholder: String,
    pub no_image_placeholder: String,
    pub disclaimer_title: String,
    pub disclaimer: String,
    /// Cell / model code text when a value is missing
    pub empty_value: String,
    /// Notice shown when an export fails
    pub export_failed: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            size_chart_suffix: "SIZE CHART".to_string(),
            model_code_caption: "MODEL CODE".to_string(),
            measurements_title: "Measurements (cm)".to_string(),
            select_size_placeholder: "Select a size".to_string(),
            product_details_title: "Product Details".to_string(),
            no_details_placeholder: "No product details provided.".to_string(),
            no_image_placeholder: "No image".to_string(),
            disclaimer_title: "Note:".to_string(),
            disclaimer: "Measurements may vary by +/- 1-2 cm due to production tolerances.".to_string(),
            empty_value: "-".to_string(),
            export_failed: "The image could not be generated. Please try again.".to_string(),
        }
    }
}

/// Unvalidated wire shape of [`AppConfig`]
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct RawAppConfig {
    brand_name: String,
    categories: Vec<CategoryDefinition>,
    #[serde(default)]
    labels: ChartLabels,
}

/// Validated application configuration
///
/// Always holds at least one category with unique, non-empty ids.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawAppConfig", into = "RawAppConfig")]
pub struct AppConfig {
    brand_name: String,
    categories: Vec<CategoryDefinition>,
    labels: ChartLabels,
}

impl TryFrom<RawAppConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAppConfig) -> Result<Self, Self::Error> {
        AppConfig::new(&raw.brand_name, raw.categories, raw.labels)
    }
}

impl From<AppConfig> for RawAppConfig {
    fn from(config: AppConfig) -> Self {
        RawAppConfig {
            brand_name: config.brand_name,
            categories: config.categories,
            labels: config.labels,
        }
    }
}

impl AppConfig {
    pub fn new(
        brand_name: &str,
        categories: Vec<CategoryDefinition>,
        labels: ChartLabels,
    ) -> Result<Self, ConfigError> {
        if categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if category.id.trim().is_empty() {
                return Err(ConfigError::EmptyCategoryId(category.label.clone()));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(Self {
            brand_name: brand_name.to_string(),
            categories,
            labels,
        })
    }

    /// The catalogue embedded in the module
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    pub fn default_category(&self) -> &CategoryDefinition {
        &self.categories[0]
    }

    pub fn find_category(&self, id: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Category for an id, falling back to the first category
    pub fn category(&self, id: &str) -> &CategoryDefinition {
        self.find_category(id).unwrap_or_else(|| {
            log::warn!("Unknown category '{}', falling back to '{}'", id, self.default_category().id);
            self.default_category()
        })
    }
}
