//! # RoomKit Planner
//!
//! Grid placement and layout state engine for furniture planning.
//!
//! Furniture is placed on a grid of square cells covering the room. The
//! engine keeps the authoritative list of placed items, rejects edits that
//! would overlap another item or intrude on the reserved border, and keeps
//! a snapshot history for undo/redo.
//!
//! ## Components
//!
//! - [`grid`]: Conversion between grid cells and centered room coordinates
//! - [`occupancy`]: Footprint collision queries
//! - [`planner_state`]: The placement state machine
//! - [`history`]: Snapshot-based undo/redo
//! - [`serialization`]: Stored and export layout formats
//! - [`store`]: Layout stores (files, memory)
//!
//! ## Example
//!
//! ```
//! use roomkit_core::{CatalogEntry, FurnitureCatalog};
//! use roomkit_planner::PlannerState;
//! use std::sync::Arc;
//!
//! let catalog = FurnitureCatalog::new().with_entry("Table", CatalogEntry::new(2, 2));
//! let mut planner = PlannerState::new(Arc::new(catalog));
//!
//! let id = planner.add_item("Table", 5, 5).unwrap();
//! assert!(planner.add_item("Table", 5, 6).is_err());
//! planner.move_item_to_cell(id, 10, 10).unwrap();
//! assert!(planner.undo());
//! ```

pub mod grid;
pub mod history;
pub mod model;
pub mod occupancy;
pub mod planner_state;
pub mod serialization;
pub mod store;

pub use grid::{CellRect, GridGeometry};
pub use history::{EditKind, HistoryEntry, HistoryManager};
pub use model::{Footprint, GridCell, LayoutSnapshot, PlacedItem, Room, RoomPoint};
pub use occupancy::OccupancyIndex;
pub use planner_state::PlannerState;
pub use serialization::{
    parse_layout, ExportItem, ExportLayout, ItemData, LayoutFile, LayoutMetadata, RoomData,
};
pub use store::{FileStore, LayoutStore, MemoryStore};
