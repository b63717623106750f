//! # RoomKit Core
//!
//! Core types and utilities shared by the RoomKit crates.
//! Provides the error taxonomy, the read-only furniture catalog and
//! length unit handling for room dimensions.

pub mod catalog;
pub mod error;
pub mod units;

pub use catalog::{CatalogEntry, FurnitureCatalog};
pub use error::{CatalogError, Error, LayoutError, PersistenceError, PlacementError, Result};
pub use units::{format_length, parse_length, LengthUnit};

/// Opaque, never reused identifier of a placed item.
pub type ItemId = u64;
