//! Planner state manager.
//! Owns the placed items and the room, validates every edit and records
//! accepted edits in the history.
//!
//! This module is split into submodules:
//! - `items`: Add, move, rotate, flip and remove furniture
//! - `room`: Room resize and layout reset
//! - `history`: Undo/redo
//! - `file_io`: Save, load and export through a layout store

mod file_io;
mod history;
mod items;
mod room;

use crate::grid::{CellRect, GridGeometry};
use crate::history::{EditKind, HistoryManager};
use crate::model::{LayoutSnapshot, PlacedItem, Room};
use crate::occupancy::OccupancyIndex;
use anyhow::Context;
use roomkit_core::{FurnitureCatalog, ItemId, PlacementError};
use roomkit_settings::{Config, GridSettings, HistorySettings};
use std::path::PathBuf;
use std::sync::Arc;

/// Authoritative layout state for one room.
///
/// Every mutating operation is atomic: it either passes validation, mutates
/// the state and records one history entry, or returns an error and leaves
/// everything as it was.
#[derive(Debug, Clone)]
pub struct PlannerState {
    catalog: Arc<FurnitureCatalog>,
    grid_settings: GridSettings,
    default_room: Room,
    items: Vec<PlacedItem>,
    room: Room,
    geometry: GridGeometry,
    history: HistoryManager,
    next_id: ItemId,
    pub layout_name: String,
    current_key: Option<String>,
    current_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl PlannerState {
    /// Creates a planner with the default grid, room and history depth.
    pub fn new(catalog: Arc<FurnitureCatalog>) -> Self {
        Self::with_settings(
            catalog,
            GridSettings::default(),
            Room::default(),
            HistorySettings::default().max_depth,
        )
    }

    /// Creates a planner from a loaded configuration.
    pub fn from_config(config: &Config, catalog: Arc<FurnitureCatalog>) -> anyhow::Result<Self> {
        config.validate().context("Invalid planner configuration")?;
        let room = Room::new(config.room.default_width, config.room.default_height)
            .context("Invalid default room")?;

        Ok(Self::with_settings(
            catalog,
            config.grid.clone(),
            room,
            config.history.max_depth,
        ))
    }

    fn with_settings(
        catalog: Arc<FurnitureCatalog>,
        grid_settings: GridSettings,
        room: Room,
        max_depth: usize,
    ) -> Self {
        let geometry = GridGeometry::new(&room, &grid_settings);
        Self {
            catalog,
            grid_settings,
            default_room: room,
            items: Vec::new(),
            room,
            geometry,
            history: HistoryManager::new(LayoutSnapshot::empty(room), max_depth),
            next_id: 1,
            layout_name: "Untitled".to_string(),
            current_key: None,
            current_file_path: None,
            is_modified: false,
        }
    }

    pub fn catalog(&self) -> &Arc<FurnitureCatalog> {
        &self.catalog
    }

    /// Items in placement order.
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn room(&self) -> Room {
        self.room
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn grid_settings(&self) -> &GridSettings {
        &self.grid_settings
    }

    /// Occupancy view over the current items.
    pub fn occupancy(&self) -> OccupancyIndex<'_> {
        OccupancyIndex::new(&self.geometry, &self.items)
    }

    /// Copy of the current state, for the presentation layer.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            items: self.items.clone(),
            room: self.room,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Store key the layout was last saved to or loaded from.
    pub fn current_key(&self) -> Option<&str> {
        self.current_key.as_deref()
    }

    pub fn current_file_path(&self) -> Option<&std::path::Path> {
        self.current_file_path.as_deref()
    }

    /// Layout name with a trailing `*` while there are unsaved edits.
    pub fn display_name(&self) -> String {
        if self.is_modified {
            format!("{}*", self.layout_name)
        } else {
            self.layout_name.clone()
        }
    }

    /// Checks a candidate footprint against the bounds and every other item.
    fn validate_placement(
        &self,
        rect: &CellRect,
        exclude: Option<ItemId>,
    ) -> Result<(), PlacementError> {
        self.geometry.check_bounds(rect)?;
        if let Some(occupant) = self.occupancy().first_occupant(rect, exclude) {
            return Err(PlacementError::Overlap {
                row: rect.row,
                col: rect.col,
                occupant,
            });
        }
        Ok(())
    }

    fn index_of(&self, id: ItemId) -> Result<usize, PlacementError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(PlacementError::NotFound { id })
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Records the current state as a new history entry.
    fn commit(&mut self, kind: EditKind, description: String) {
        tracing::debug!("{}: {}", kind, description);
        let snapshot = self.snapshot();
        self.history.record(kind, description, snapshot);
        self.is_modified = true;
    }

    /// Replaces the items and room with a snapshot, leaving history alone.
    fn restore(&mut self, snapshot: LayoutSnapshot) {
        self.items = snapshot.items;
        self.room = snapshot.room;
        self.geometry = GridGeometry::new(&self.room, &self.grid_settings);
    }
}
