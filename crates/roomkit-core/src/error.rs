//! Error handling for RoomKit
//!
//! Provides error types for all layers of the planner:
//! - Placement errors (validation of edits against the grid)
//! - Layout errors (structural validation of stored layouts)
//! - Persistence errors (external store I/O)
//! - Catalog errors (loading the furniture catalog)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::ItemId;
use thiserror::Error;

/// Placement error type
///
/// Every placement error is a refusal: the planner state is left exactly
/// as it was before the rejected edit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Footprint crosses the border margin or the grid extents
    #[error("Footprint {width}x{height} at row {row}, column {col} is outside the placeable area")]
    OutOfBounds {
        /// Anchor row of the rejected footprint.
        row: i32,
        /// Anchor column of the rejected footprint.
        col: i32,
        /// Footprint width in cells.
        width: u32,
        /// Footprint height in cells.
        height: u32,
    },

    /// Footprint intersects an already placed item
    #[error("Cells at row {row}, column {col} are already occupied by item {occupant}")]
    Overlap {
        /// Anchor row of the rejected footprint.
        row: i32,
        /// Anchor column of the rejected footprint.
        col: i32,
        /// The first item found in the way.
        occupant: ItemId,
    },

    /// Referenced item does not exist
    #[error("Item {id} not found")]
    NotFound {
        /// The unknown item id.
        id: ItemId,
    },

    /// Model name is not in the furniture catalog
    #[error("Unknown furniture model: {name}")]
    UnknownModel {
        /// The model name that was looked up.
        name: String,
    },

    /// Quarter turn would take the rotation outside the `i32` range
    #[error("Item {id} cannot rotate from {rotation} degrees (baseline {initial_rotation})")]
    InvalidRotation {
        /// The item being rotated.
        id: ItemId,
        /// Its current rotation.
        rotation: i32,
        /// Its baseline rotation.
        initial_rotation: i32,
    },

    /// Room dimensions must be positive and finite
    #[error("Invalid room dimensions {width}x{height}")]
    InvalidRoom {
        /// The requested width.
        width: f64,
        /// The requested height.
        height: f64,
    },
}

/// Layout error type
///
/// Raised when serialized layout data fails structural validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Required fields are missing or of the wrong shape
    #[error("Malformed layout: {reason}")]
    Malformed {
        /// What was wrong with the input.
        reason: String,
    },

    /// File format version is not understood
    #[error("Unsupported layout version {version}")]
    UnsupportedVersion {
        /// The version found in the file.
        version: String,
    },
}

impl LayoutError {
    /// Create a malformed-layout error from a message
    pub fn malformed(reason: impl Into<String>) -> Self {
        LayoutError::Malformed {
            reason: reason.into(),
        }
    }
}

/// Persistence error type
///
/// Represents failures of the external layout store. These never affect
/// the in-memory layout.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Reading or writing the backing storage failed
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        /// The storage key involved.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Storage key cannot be mapped to a storage location
    #[error("Invalid storage key '{key}'")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// Layout could not be encoded for storage
    #[error("Failed to serialize layout: {reason}")]
    Serialize {
        /// The encoder message.
        reason: String,
    },
}

/// Catalog error type
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON could not be parsed
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog entry has unusable values
    #[error("Invalid catalog entry '{name}': {reason}")]
    InvalidEntry {
        /// The model name of the entry.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Main error type for RoomKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Placement error
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a placement refusal
    pub fn is_placement_error(&self) -> bool {
        matches!(self, Error::Placement(_))
    }

    /// Check if this is a layout validation error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }

    /// Check if the referenced item was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Placement(PlacementError::NotFound { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
