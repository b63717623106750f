//! Furniture catalog
//!
//! Maps model names to their footprint and render metadata. The catalog is
//! loaded once and then shared read-only; placement only reads `model_size`
//! and `initial_rotation`, everything else is passed through at export time.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One furniture model as described in the catalog JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Footprint in cells, `[width, height]`
    pub model_size: [u32; 2],
    #[serde(default)]
    pub initial_rotation: i32,
    #[serde(default)]
    pub model_picture: String,
    #[serde(default)]
    pub file_location: String,
    #[serde(default = "default_scaling_factor")]
    pub scaling_factor: f64,
    /// Vertical offset applied by the renderer
    #[serde(default = "default_upwards")]
    pub upwards: f64,
}

pub fn default_scaling_factor() -> f64 {
    1.0
}

pub fn default_upwards() -> f64 {
    0.01
}

impl CatalogEntry {
    /// Creates an entry with the given footprint and default metadata.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            model_size: [width, height],
            initial_rotation: 0,
            model_picture: String::new(),
            file_location: String::new(),
            scaling_factor: default_scaling_factor(),
            upwards: default_upwards(),
        }
    }

    /// Sets the baseline rotation.
    pub fn with_initial_rotation(mut self, degrees: i32) -> Self {
        self.initial_rotation = degrees;
        self
    }

    /// Sets the 3D asset reference.
    pub fn with_file_location(mut self, location: impl Into<String>) -> Self {
        self.file_location = location.into();
        self
    }

    /// Sets the render scale and vertical offset.
    pub fn with_render(mut self, scaling_factor: f64, upwards: f64) -> Self {
        self.scaling_factor = scaling_factor;
        self.upwards = upwards;
        self
    }

    pub fn width(&self) -> u32 {
        self.model_size[0]
    }

    pub fn height(&self) -> u32 {
        self.model_size[1]
    }

    fn validate(&self, name: &str) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidEntry {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if self.model_size[0] == 0 || self.model_size[1] == 0 {
            return Err(invalid("model_size must be at least 1x1"));
        }
        if self.initial_rotation % 90 != 0 {
            return Err(invalid("initial_rotation must be a multiple of 90"));
        }
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(invalid("scaling_factor must be positive"));
        }
        if !self.upwards.is_finite() {
            return Err(invalid("upwards must be finite"));
        }
        Ok(())
    }
}

/// Read-only furniture catalog keyed by model name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FurnitureCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl FurnitureCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry while building a catalog.
    pub fn with_entry(mut self, name: impl Into<String>, entry: CatalogEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    /// Parses a catalog from the `models.json` format and validates every entry.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: FurnitureCatalog = serde_json::from_str(json)?;
        for (name, entry) in &catalog.entries {
            entry.validate(name)?;
        }
        tracing::debug!("Loaded furniture catalog with {} models", catalog.len());
        Ok(catalog)
    }

    /// Loads a catalog file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, model_name: &str) -> Option<&CatalogEntry> {
        self.entries.get(model_name)
    }

    pub fn contains(&self, model_name: &str) -> bool {
        self.entries.contains_key(model_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Model names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Case-insensitive substring search over model names, sorted.
    pub fn search<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let needle = text.trim().to_lowercase();
        self.names()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
