//! # RoomKit
//!
//! A grid-based room layout planner. Furniture from a catalog is placed on a
//! grid covering the room, moved, rotated, flipped and removed, and the
//! resulting layout is saved for later or exported for 3D rendering.
//!
//! ## Architecture
//!
//! RoomKit is organized as a workspace with multiple crates:
//!
//! 1. **roomkit-core** - Error types, furniture catalog, length units
//! 2. **roomkit-settings** - Configuration file handling
//! 3. **roomkit-planner** - Grid mapping, placement rules, history, layout formats, stores
//! 4. **roomkit** - Logging setup and the [`cli`] driver

pub mod cli;

pub use roomkit_core::{
    format_length, parse_length, CatalogEntry, CatalogError, Error, FurnitureCatalog, ItemId,
    LayoutError, LengthUnit, PersistenceError, PlacementError, Result,
};

pub use roomkit_settings::{Config, ConfigError, SettingsError};

pub use roomkit_planner::{
    parse_layout, CellRect, EditKind, ExportLayout, FileStore, GridGeometry, HistoryManager,
    LayoutFile, LayoutSnapshot, LayoutStore, MemoryStore, PlacedItem, PlannerState, Room,
    RoomPoint,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for command results
/// - RUST_LOG environment variable support
/// - JSON lines instead of text when `ROOMKIT_LOG_FORMAT=json`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let json = std::env::var("ROOMKIT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
