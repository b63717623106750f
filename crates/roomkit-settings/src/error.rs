//! Errors raised while reading, writing and checking the planner config
//! (`config.toml` or `config.json`).

use std::io;
use thiserror::Error;

/// Failure to load or save the planner config file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The config file or its directory could not be read or written.
    #[error("Config file I/O failed: {0}")]
    IoError(#[from] io::Error),

    /// `config.json` is not valid JSON for [`crate::Config`].
    #[error("Invalid JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// `config.toml` is not valid TOML for [`crate::Config`].
    #[error("Invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The config could not be written out as TOML.
    #[error("Could not encode config as TOML: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// The file parsed but a grid, room, history or storage value was rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A config value the planner cannot work with.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Extension other than `.toml` or `.json`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Cell size, default room dimension or undo depth outside its range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// A storage key is blank.
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// No per-user config directory is known for this OS.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Result of loading or saving the planner config.
pub type SettingsResult<T> = Result<T, SettingsError>;
