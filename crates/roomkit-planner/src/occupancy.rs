//! Occupancy queries against the placed items.

use crate::grid::{CellRect, GridGeometry};
use crate::model::PlacedItem;
use roomkit_core::ItemId;

/// Answers whether a rectangular footprint is free.
///
/// `OccupancyIndex` is a borrowed view over the current items and grid.
/// Each item's cell rectangle is derived from its stored room position
/// through [`GridGeometry::to_grid`], so the answer always reflects the
/// current room dimensions.
///
/// # Cost
///
/// Queries are linear in the number of items. Layouts hold at most a few
/// dozen pieces of furniture, so no spatial structure is kept.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyIndex<'a> {
    geometry: &'a GridGeometry,
    items: &'a [PlacedItem],
}

impl<'a> OccupancyIndex<'a> {
    /// Creates a view over `items` laid out on `geometry`.
    pub fn new(geometry: &'a GridGeometry, items: &'a [PlacedItem]) -> Self {
        Self { geometry, items }
    }

    /// Returns the cell rectangle an item currently covers, or `None` if its
    /// stored position has no grid cell.
    pub fn footprint_of(&self, item: &PlacedItem) -> Option<CellRect> {
        self.geometry.footprint_rect(item.position, item.footprint)
    }

    /// Returns the first item whose footprint intersects `rect`.
    ///
    /// # Arguments
    ///
    /// * `rect` - Candidate footprint in grid-cell space
    /// * `exclude` - Item to ignore, used when testing a move of an item
    ///   against its own current footprint
    ///
    /// # Returns
    ///
    /// `Some(id)` of the first blocking item in placement order, `None` if
    /// the area is free.
    pub fn first_occupant(&self, rect: &CellRect, exclude: Option<ItemId>) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|item| Some(item.id) != exclude)
            .find(|item| self.footprint_of(item).is_some_and(|r| r.intersects(rect)))
            .map(|item| item.id)
    }

    /// Returns `true` if any item other than `exclude` intersects `rect`.
    pub fn is_occupied(&self, rect: &CellRect, exclude: Option<ItemId>) -> bool {
        self.first_occupant(rect, exclude).is_some()
    }

    /// Lists every pair of items whose footprints intersect.
    ///
    /// Accepted edits never produce such pairs; a loaded layout might.
    pub fn overlapping_pairs(&self) -> Vec<(ItemId, ItemId)> {
        let rects: Vec<(ItemId, CellRect)> = self
            .items
            .iter()
            .filter_map(|item| Some((item.id, self.footprint_of(item)?)))
            .collect();

        let mut pairs = Vec::new();
        for (i, (a_id, a)) in rects.iter().enumerate() {
            for (b_id, b) in &rects[i + 1..] {
                if a.intersects(b) {
                    pairs.push((*a_id, *b_id));
                }
            }
        }
        pairs
    }
}
