//! Configuration for the RoomKit planner
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Grid geometry (cell size, reserved border)
//! - Room defaults (dimensions used for new and reset layouts)
//! - History (undo depth)
//! - Storage (layout directory and keys)

use crate::error::{ConfigError, SettingsResult};
use roomkit_core::LengthUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grid geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Edge length of one grid cell, in centimeters
    pub cell_size: f64,
    /// Width of the reserved ring along every wall, in cells
    pub border_cells: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            border_cells: 2,
        }
    }
}

/// Room defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    /// Width of a new room, in centimeters
    pub default_width: f64,
    /// Height of a new room, in centimeters
    pub default_height: f64,
    /// Unit used when showing dimensions to the user
    pub unit: LengthUnit,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            default_width: 1000.0,
            default_height: 1000.0,
            unit: LengthUnit::Centimeters,
        }
    }
}

/// Undo/redo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Layout storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one JSON file per storage key
    pub directory: PathBuf,
    /// Key used by explicit save/load
    pub layout_key: String,
    /// Key used by the host's autosave
    pub autosave_key: String,
    /// Key the 3D front-end reads the export from
    pub export_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let directory = dirs::data_dir()
            .map(|dir| dir.join("roomkit").join("layouts"))
            .unwrap_or_else(|| PathBuf::from("layouts"));
        Self {
            directory,
            layout_key: "savedLayout".to_string(),
            autosave_key: "autoSavedLayout".to_string(),
            export_key: "layoutData".to_string(),
        }
    }
}

/// Complete planner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridSettings,
    pub room: RoomSettings,
    pub history: HistorySettings,
    pub storage: StorageSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file (`<config dir>/roomkit/config.toml`)
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("roomkit").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults when
    /// no file exists yet
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let out_of_range = |key: &str, value: String| ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value,
        };

        if !self.grid.cell_size.is_finite() || self.grid.cell_size <= 0.0 {
            return Err(out_of_range("grid.cell_size", self.grid.cell_size.to_string()));
        }

        if !self.room.default_width.is_finite() || self.room.default_width <= 0.0 {
            return Err(out_of_range(
                "room.default_width",
                self.room.default_width.to_string(),
            ));
        }

        if !self.room.default_height.is_finite() || self.room.default_height <= 0.0 {
            return Err(out_of_range(
                "room.default_height",
                self.room.default_height.to_string(),
            ));
        }

        if self.history.max_depth == 0 {
            return Err(out_of_range("history.max_depth", "0".to_string()));
        }

        for (key, value) in [
            ("storage.layout_key", &self.storage.layout_key),
            ("storage.autosave_key", &self.storage.autosave_key),
            ("storage.export_key", &self.storage.export_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingKey(key.to_string()));
            }
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
