//! RoomKit Settings Crate
//!
//! Handles planner configuration: grid geometry, room defaults, history
//! depth and the layout storage location.

pub mod config;
pub mod error;

pub use config::{Config, GridSettings, HistorySettings, RoomSettings, StorageSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
