//! Furniture placement operations for planner state.

use super::PlannerState;
use crate::grid::CellRect;
use crate::history::EditKind;
use crate::model::{Footprint, GridCell, PlacedItem, RoomPoint};
use roomkit_core::{ItemId, PlacementError};

impl PlannerState {
    /// Places a catalog model with its top-left cell at `(row, col)`.
    ///
    /// The item starts at the catalog's initial rotation, unflipped.
    pub fn add_item(
        &mut self,
        model_name: &str,
        row: i32,
        col: i32,
    ) -> Result<ItemId, PlacementError> {
        let entry = self
            .catalog
            .get(model_name)
            .ok_or_else(|| PlacementError::UnknownModel {
                name: model_name.to_string(),
            })?;
        let footprint = Footprint::new(entry.width(), entry.height());
        let initial_rotation = entry.initial_rotation;

        let cell = GridCell::new(row, col);
        let rect = CellRect::at(cell, footprint);
        if let Err(e) = self.validate_placement(&rect, None) {
            tracing::warn!("Rejected placement of {}: {}", model_name, e);
            return Err(e);
        }

        let Some(position) = self.geometry.to_room(cell) else {
            return Err(out_of_bounds(cell, footprint));
        };
        let id = self.allocate_id();
        self.items.push(PlacedItem {
            id,
            model_name: model_name.to_string(),
            footprint,
            position,
            rotation: initial_rotation,
            initial_rotation,
            flipped: false,
        });

        self.commit(
            EditKind::ItemAdded,
            format!("Add {} at ({}, {})", model_name, position.x, position.y),
        );
        Ok(id)
    }

    /// Moves an item to a room position, optionally setting its flip state.
    pub fn move_item(
        &mut self,
        id: ItemId,
        position: RoomPoint,
        flipped: Option<bool>,
    ) -> Result<(), PlacementError> {
        let index = self.index_of(id)?;
        let footprint = self.items[index].footprint;
        let placement = self
            .geometry
            .placement_rect(position, footprint)
            .and_then(|rect| self.validate_placement(&rect, Some(id)));
        if let Err(e) = placement {
            tracing::warn!("Rejected move of item {}: {}", id, e);
            return Err(e);
        }

        let item = &mut self.items[index];
        item.position = position;
        if let Some(flipped) = flipped {
            item.flipped = flipped;
        }
        let description = format!("Move {} to ({}, {})", item.model_name, position.x, position.y);

        self.commit(EditKind::ItemMoved, description);
        Ok(())
    }

    /// Moves an item so its top-left cell lands on `(row, col)`.
    pub fn move_item_to_cell(
        &mut self,
        id: ItemId,
        row: i32,
        col: i32,
    ) -> Result<(), PlacementError> {
        let footprint = self.items[self.index_of(id)?].footprint;
        let cell = GridCell::new(row, col);
        let Some(position) = self.geometry.to_room(cell) else {
            tracing::warn!("Rejected move of item {}: no room position for {:?}", id, cell);
            return Err(out_of_bounds(cell, footprint));
        };
        self.move_item(id, position, None)
    }

    /// Rotates an item a quarter turn and returns its new rotation.
    ///
    /// Rotation cycles through `initial_rotation + {0, 90, 180, 270}`. The
    /// footprint keeps its width and height.
    pub fn rotate_item(&mut self, id: ItemId) -> Result<i32, PlacementError> {
        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        let baseline = i64::from(item.initial_rotation);
        let turned = (i64::from(item.rotation) - baseline + 90).rem_euclid(360) + baseline;
        let Ok(rotation) = i32::try_from(turned) else {
            return Err(PlacementError::InvalidRotation {
                id,
                rotation: item.rotation,
                initial_rotation: item.initial_rotation,
            });
        };
        item.rotation = rotation;
        let description = format!("Rotate {} to {}°", item.model_name, rotation);

        self.commit(EditKind::ItemRotated, description);
        Ok(rotation)
    }

    /// Toggles an item's mirror state and returns the new value.
    pub fn flip_item(&mut self, id: ItemId) -> Result<bool, PlacementError> {
        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        item.flipped = !item.flipped;
        let flipped = item.flipped;
        let description = format!("Flip {}", item.model_name);

        self.commit(EditKind::ItemFlipped, description);
        Ok(flipped)
    }

    /// Removes an item. Returns `false` without recording anything if no
    /// item has that id.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let Ok(index) = self.index_of(id) else {
            return false;
        };
        let item = self.items.remove(index);
        self.commit(EditKind::ItemRemoved, format!("Remove {}", item.model_name));
        true
    }
}

fn out_of_bounds(cell: GridCell, footprint: Footprint) -> PlacementError {
    PlacementError::OutOfBounds {
        row: cell.row,
        col: cell.col,
        width: footprint.width,
        height: footprint.height,
    }
}
