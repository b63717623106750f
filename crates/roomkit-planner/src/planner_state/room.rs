//! Room operations for planner state.

use super::PlannerState;
use crate::grid::GridGeometry;
use crate::history::EditKind;
use crate::model::Room;
use roomkit_core::{ItemId, PlacementError};

impl PlannerState {
    /// Changes the room dimensions.
    ///
    /// Items are kept where they are even if they no longer fit; see
    /// [`Self::misplaced_items`].
    pub fn resize_room(&mut self, width: f64, height: f64) -> Result<(), PlacementError> {
        let room = match Room::new(width, height) {
            Ok(room) => room,
            Err(e) => {
                tracing::warn!("Rejected room resize: {}", e);
                return Err(e);
            }
        };

        self.room = room;
        self.geometry = GridGeometry::new(&self.room, &self.grid_settings);

        let misplaced = self.misplaced_items().len();
        if misplaced > 0 {
            tracing::debug!("{} item(s) fall outside the resized room", misplaced);
        }

        self.commit(
            EditKind::RoomResized,
            format!("Resize room to {} x {}", width, height),
        );
        Ok(())
    }

    /// Removes every item and restores the default room.
    pub fn reset(&mut self) {
        self.items.clear();
        self.room = self.default_room;
        self.geometry = GridGeometry::new(&self.room, &self.grid_settings);
        self.commit(EditKind::LayoutReset, "Reset layout".to_string());
    }

    /// Items whose footprint crosses the border or the grid edge, which can
    /// only happen after the room shrank or a layout was loaded.
    pub fn misplaced_items(&self) -> Vec<ItemId> {
        let occupancy = self.occupancy();
        self.items
            .iter()
            .filter(|item| {
                occupancy
                    .footprint_of(item)
                    .is_none_or(|rect| self.geometry.check_bounds(&rect).is_err())
            })
            .map(|item| item.id)
            .collect()
    }
}
