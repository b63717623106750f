//! Layout data model: room, placed items and snapshots.

use roomkit_core::{ItemId, PlacementError};
use serde::{Deserialize, Serialize};

/// Room dimensions in centimeters. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    width: f64,
    height: f64,
}

impl Room {
    /// Creates a room, rejecting non-positive or non-finite dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, PlacementError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(PlacementError::InvalidRoom { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for Room {
    /// The 1000 x 1000 room a fresh planner starts with.
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
        }
    }
}

/// Extent of an item in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Point in centered room space. `y` grows away from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomPoint {
    pub x: i32,
    pub y: i32,
}

impl RoomPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cell in grid space, origin at the top-left corner.
///
/// Signed so that positions outside the grid (after a room shrink) can
/// still be expressed and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

impl GridCell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A furniture item placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub model_name: String,
    pub footprint: Footprint,
    /// Room-space position of the footprint's top-left cell
    pub position: RoomPoint,
    /// Current rotation in degrees
    pub rotation: i32,
    /// Baseline rotation captured from the catalog at creation
    pub initial_rotation: i32,
    pub flipped: bool,
}

impl PlacedItem {
    /// Rotation relative to the item's own baseline, in `0..360`.
    pub fn relative_rotation(&self) -> i32 {
        (i64::from(self.rotation) - i64::from(self.initial_rotation)).rem_euclid(360) as i32
    }
}

/// Complete, immutable copy of the layout at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub items: Vec<PlacedItem>,
    pub room: Room,
}

impl LayoutSnapshot {
    /// An empty layout for the given room.
    pub fn empty(room: Room) -> Self {
        Self {
            items: Vec::new(),
            room,
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Largest item id in the snapshot, if any.
    pub fn max_id(&self) -> Option<ItemId> {
        self.items.iter().map(|item| item.id).max()
    }
}
