//! Form state snapshot
//!
//! `FormState` is everything the sidebar collects from the user. It is owned by
//! the surrounding application; layout and export only ever read a snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::format::CanvasFormat;
use crate::config::AppConfig;

/// Website shown in the footer until the user types their own
pub const DEFAULT_WEBSITE: &str = "www.yourbrand.com";

/// Ordered set of selected size labels
///
/// Insertion order is the column order of the measurement table. Labels are
/// unique; inserting an existing label is a no-op.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SizeSelection(Vec<String>);

impl SizeSelection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a size; returns false if it was already selected
    pub fn insert(&mut self, size: &str) -> bool {
        if self.contains(size) {
            return false;
        }
        self.0.push(size.to_string());
        true
    }

    /// Remove a size; returns false if it was not selected
    pub fn remove(&mut self, size: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|s| s != size);
        self.0.len() != before
    }

    /// Select or deselect a size, returning whether it is selected afterwards
    pub fn toggle(&mut self, size: &str) -> bool {
        if self.remove(size) {
            false
        } else {
            self.0.push(size.to_string());
            true
        }
    }

    pub fn contains(&self, size: &str) -> bool {
        self.0.iter().any(|s| s == size)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for SizeSelection {
    fn from(sizes: Vec<String>) -> Self {
        let mut selection = SizeSelection::new();
        for size in &sizes {
            selection.insert(size);
        }
        selection
    }
}

impl From<SizeSelection> for Vec<String> {
    fn from(selection: SizeSelection) -> Self {
        selection.0
    }
}

impl<'a> FromIterator<&'a str> for SizeSelection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut selection = SizeSelection::new();
        for size in iter {
            selection.insert(size);
        }
        selection
    }
}

/// Complete user input for one chart
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    /// Logo image (data URL or URL); takes precedence over the brand name
    #[serde(default)]
    pub logo: Option<String>,

    /// Text branding used when there is no logo
    #[serde(default)]
    pub brand_name: String,

    /// Footer website string
    #[serde(default)]
    pub website_url: String,

    /// Active category id
    pub selected_category_id: String,

    /// Model code shown in the header and used for the export filename
    #[serde(default)]
    pub model_code: String,

    /// Selected sizes, in column order
    #[serde(default)]
    pub selected_sizes: SizeSelection,

    /// size -> measurement name -> value
    #[serde(default)]
    pub measurements: BTreeMap<String, BTreeMap<String, String>>,

    /// fabric property name -> value
    #[serde(default)]
    pub fabric_values: BTreeMap<String, String>,

    /// Active canvas format
    #[serde(default)]
    pub canvas_format: CanvasFormat,
}

impl FormState {
    /// Initial state for a freshly opened editor
    ///
    /// Brand name comes from the config, the first category is selected and no
    /// sizes are chosen so the user is asked to pick them.
    pub fn for_config(config: &AppConfig) -> Self {
        Self {
            logo: None,
            brand_name: config.brand_name().to_string(),
            website_url: DEFAULT_WEBSITE.to_string(),
            selected_category_id: config.default_category().id.clone(),
            model_code: String::new(),
            selected_sizes: SizeSelection::new(),
            measurements: BTreeMap::new(),
            fabric_values: BTreeMap::new(),
            canvas_format: CanvasFormat::Portrait,
        }
    }

    /// Logo to display, treating a blank string as absent
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref().filter(|logo| !logo.trim().is_empty())
    }

    /// Apply a logo loaded at startup unless the user already set one
    ///
    /// Returns true if the logo was applied.
    pub fn offer_default_logo(&mut self, logo: String) -> bool {
        if self.logo().is_some() {
            return false;
        }
        self.logo = Some(logo);
        true
    }

    /// Measurement value for a size, if one was entered
    pub fn measurement(&self, size: &str, name: &str) -> Option<&str> {
        self.measurements
            .get(size)
            .and_then(|row| row.get(name))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn set_measurement(&mut self, size: &str, name: &str, value: &str) {
        self.measurements
            .entry(size.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    /// Fabric property value, if non-empty
    pub fn fabric_value(&self, property: &str) -> Option<&str> {
        self.fabric_values
            .get(property)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn set_fabric_value(&mut self, property: &str, value: &str) {
        self.fabric_values.insert(property.to_string(), value.to_string());
    }

    /// Trimmed model code, `None` when blank
    pub fn model_code(&self) -> Option<&str> {
        Some(self.model_code.trim()).filter(|code| !code.is_empty())
    }
}
