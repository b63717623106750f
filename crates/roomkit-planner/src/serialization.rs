//! Serialization and deserialization of layouts.
//!
//! Two representations are produced from a [`LayoutSnapshot`]:
//! - [`LayoutFile`]: the stored form, a versioned JSON document that loads
//!   back into the planner.
//! - [`ExportLayout`]: the render form read by the 3D front-end, with
//!   catalog metadata joined in and the `y` axis negated.
//!
//! Everything here is pure data conversion; store I/O lives in
//! [`crate::store`].

use crate::model::{Footprint, LayoutSnapshot, PlacedItem, Room, RoomPoint};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use roomkit_core::{FurnitureCatalog, ItemId, LayoutError, PersistenceError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Layout file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Largest `|x|` or `|y|` accepted in a stored layout
pub const MAX_COORDINATE: i32 = 1_000_000;

/// Largest `|rotation|` or `|initial_rotation|` accepted in a stored layout
pub const MAX_ROTATION: i32 = 3600;

/// Largest item id accepted in a stored layout (2^53 - 1, the largest id a
/// JSON number holds exactly)
pub const MAX_ITEM_ID: ItemId = (1 << 53) - 1;

/// Complete stored layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: LayoutMetadata,
    pub room: RoomData,
    pub items: Vec<ItemData>,
}

fn default_version() -> String {
    FILE_FORMAT_VERSION.to_string()
}

/// Layout metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for LayoutMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            name: "Untitled".to_string(),
            created: now,
            modified: now,
        }
    }
}

/// Serialized room dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoomData {
    pub width: f64,
    pub height: f64,
}

/// Serialized placed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub id: ItemId,
    pub model_name: String,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub initial_rotation: i32,
    #[serde(default)]
    pub flipped: bool,
}

impl From<&PlacedItem> for ItemData {
    fn from(item: &PlacedItem) -> Self {
        Self {
            id: item.id,
            model_name: item.model_name.clone(),
            width: item.footprint.width,
            height: item.footprint.height,
            x: item.position.x,
            y: item.position.y,
            rotation: item.rotation,
            initial_rotation: item.initial_rotation,
            flipped: item.flipped,
        }
    }
}

impl From<&ItemData> for PlacedItem {
    fn from(data: &ItemData) -> Self {
        Self {
            id: data.id,
            model_name: data.model_name.clone(),
            footprint: Footprint::new(data.width, data.height),
            position: RoomPoint::new(data.x, data.y),
            rotation: data.rotation,
            initial_rotation: data.initial_rotation,
            flipped: data.flipped,
        }
    }
}

impl LayoutFile {
    /// Builds the stored form of a snapshot
    pub fn from_snapshot(name: impl Into<String>, snapshot: &LayoutSnapshot) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            room: RoomData {
                width: snapshot.room.width(),
                height: snapshot.room.height(),
            },
            items: snapshot.items.iter().map(ItemData::from).collect(),
        }
    }

    /// Converts a validated layout back into a snapshot
    pub fn to_snapshot(&self) -> Result<LayoutSnapshot, LayoutError> {
        let room = Room::new(self.room.width, self.room.height)
            .map_err(|e| LayoutError::malformed(e.to_string()))?;
        Ok(LayoutSnapshot {
            items: self.items.iter().map(PlacedItem::from).collect(),
            room,
        })
    }

    /// Structural validation beyond what the JSON shape guarantees
    pub fn validate(&self) -> Result<(), LayoutError> {
        let major = self.version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(LayoutError::UnsupportedVersion {
                version: self.version.clone(),
            });
        }

        Room::new(self.room.width, self.room.height)
            .map_err(|e| LayoutError::malformed(e.to_string()))?;

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(LayoutError::malformed(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            if item.width == 0 || item.height == 0 {
                return Err(LayoutError::malformed(format!(
                    "item {} has an empty footprint",
                    item.id
                )));
            }
            if item.id > MAX_ITEM_ID {
                return Err(LayoutError::malformed(format!(
                    "item id {} exceeds {}",
                    item.id, MAX_ITEM_ID
                )));
            }
            if item.x.unsigned_abs() > MAX_COORDINATE.unsigned_abs()
                || item.y.unsigned_abs() > MAX_COORDINATE.unsigned_abs()
            {
                return Err(LayoutError::malformed(format!(
                    "item {} position ({}, {}) is outside +/-{}",
                    item.id, item.x, item.y, MAX_COORDINATE
                )));
            }
            if item.rotation.unsigned_abs() > MAX_ROTATION.unsigned_abs()
                || item.initial_rotation.unsigned_abs() > MAX_ROTATION.unsigned_abs()
            {
                return Err(LayoutError::malformed(format!(
                    "item {} rotation {} (baseline {}) is outside +/-{}",
                    item.id, item.rotation, item.initial_rotation, MAX_ROTATION
                )));
            }
            if (item.rotation - item.initial_rotation) % 90 != 0 {
                return Err(LayoutError::malformed(format!(
                    "item {} rotation {} is not a quarter turn from {}",
                    item.id, item.rotation, item.initial_rotation
                )));
            }
        }
        Ok(())
    }

    /// Encodes the layout as pretty JSON
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Serialize {
            reason: e.to_string(),
        })
    }

    /// Save layout to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize layout")?;

        std::fs::write(path.as_ref(), json).context("Failed to write layout file")?;

        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read layout file")?;

        let mut layout = parse_layout(&content).context("Failed to parse layout file")?;

        layout.metadata.modified = Utc::now();

        Ok(layout)
    }
}

/// Parses and validates a stored layout.
///
/// Fails with [`LayoutError::Malformed`] when the JSON is invalid or any
/// required field (`room`, the `items` array, each item's id, footprint and
/// position) is missing or has the wrong shape.
pub fn parse_layout(raw: &str) -> Result<LayoutFile, LayoutError> {
    let layout: LayoutFile =
        serde_json::from_str(raw).map_err(|e| LayoutError::malformed(e.to_string()))?;
    layout.validate()?;
    Ok(layout)
}

/// One item in the render form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportItem {
    pub id: ItemId,
    pub model_name: String,
    pub file_location: String,
    pub x: i32,
    /// Render-space depth: the room-space `y` negated
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub scaling_factor: f64,
    pub initial_rotation: i32,
    pub rotation: i32,
    pub upwards: f64,
    pub flipped: bool,
}

/// Layout in the form consumed by the 3D front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLayout {
    #[serde(rename = "furniturePositions")]
    pub items: Vec<ExportItem>,
    #[serde(rename = "roomWidth")]
    pub room_width: f64,
    #[serde(rename = "roomHeight")]
    pub room_height: f64,
}

impl ExportLayout {
    /// Joins catalog render metadata into every item and flips the `y` axis.
    ///
    /// Models missing from the catalog export with an empty asset path,
    /// unit scale and the default vertical offset.
    pub fn from_snapshot(snapshot: &LayoutSnapshot, catalog: &FurnitureCatalog) -> Self {
        let items = snapshot
            .items
            .iter()
            .map(|item| {
                let entry = catalog.get(&item.model_name);
                ExportItem {
                    id: item.id,
                    model_name: item.model_name.clone(),
                    file_location: entry
                        .map(|e| e.file_location.clone())
                        .unwrap_or_default(),
                    x: item.position.x,
                    y: -i64::from(item.position.y),
                    width: item.footprint.width,
                    height: item.footprint.height,
                    scaling_factor: entry
                        .map(|e| e.scaling_factor)
                        .unwrap_or_else(roomkit_core::catalog::default_scaling_factor),
                    initial_rotation: item.initial_rotation,
                    rotation: item.rotation,
                    upwards: entry
                        .map(|e| e.upwards)
                        .unwrap_or_else(roomkit_core::catalog::default_upwards),
                    flipped: item.flipped,
                }
            })
            .collect();

        Self {
            items,
            room_width: snapshot.room.width(),
            room_height: snapshot.room.height(),
        }
    }

    /// Encodes the export as pretty JSON
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Serialize {
            reason: e.to_string(),
        })
    }
}
