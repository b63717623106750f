//! Grid geometry and coordinate mapping.
//!
//! Converts between grid cells `(row, col)` and centered room coordinates
//! `(x, y)`. Column `c` maps to `x = c - floor(columns / 2)` and row `r`
//! maps to `y = floor(rows / 2) - r`: row 0 is the top of the grid while
//! `y` grows away from the viewer.

use crate::model::{Footprint, GridCell, Room, RoomPoint};
use roomkit_core::PlacementError;
use roomkit_settings::GridSettings;

/// Axis-aligned rectangle in grid-cell space, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub row: i32,
    pub col: i32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub fn new(row: i32, col: i32, width: u32, height: u32) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// Rectangle anchored at `cell` with the given footprint.
    pub fn at(cell: GridCell, footprint: Footprint) -> Self {
        Self::new(cell.row, cell.col, footprint.width, footprint.height)
    }

    /// First row past the rectangle, in `i64` so every anchor has one.
    pub fn end_row(&self) -> i64 {
        i64::from(self.row) + i64::from(self.height)
    }

    /// First column past the rectangle.
    pub fn end_col(&self) -> i64 {
        i64::from(self.col) + i64::from(self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Standard rectangle overlap test; touching edges do not intersect.
    pub fn intersects(&self, other: &CellRect) -> bool {
        i64::from(self.row) < other.end_row()
            && self.end_row() > i64::from(other.row)
            && i64::from(self.col) < other.end_col()
            && self.end_col() > i64::from(other.col)
    }

    /// True if `other` is non-empty and lies entirely inside `self`.
    pub fn contains_rect(&self, other: &CellRect) -> bool {
        !other.is_empty()
            && other.row >= self.row
            && other.col >= self.col
            && other.end_row() <= self.end_row()
            && other.end_col() <= self.end_col()
    }

    pub fn contains_cell(&self, cell: GridCell) -> bool {
        cell.row >= self.row
            && i64::from(cell.row) < self.end_row()
            && cell.col >= self.col
            && i64::from(cell.col) < self.end_col()
    }

    /// Iterates the cells covered by the rectangle, row by row. Cells past
    /// `i32::MAX` are not addressable and are skipped.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let end_row = clamp_i32(self.end_row());
        let end_col = clamp_i32(self.end_col());
        (self.row..end_row)
            .flat_map(move |row| (self.col..end_col).map(move |col| GridCell::new(row, col)))
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Grid derived from the room dimensions and grid settings.
///
/// Recomputed whenever the room is resized; it is the single source of
/// truth for rows, columns and the reserved border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    rows: u32,
    columns: u32,
    cell_size: f64,
    border: u32,
}

impl GridGeometry {
    /// Derives the grid for a room: `rows = floor(height / cell_size)`,
    /// `columns = floor(width / cell_size)`.
    pub fn new(room: &Room, settings: &GridSettings) -> Self {
        let rows = (room.height() / settings.cell_size).floor() as u32;
        let columns = (room.width() / settings.cell_size).floor() as u32;
        Self {
            rows,
            columns,
            cell_size: settings.cell_size,
            border: settings.border_cells,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    fn half_rows(&self) -> i64 {
        i64::from(self.rows / 2)
    }

    fn half_columns(&self) -> i64 {
        i64::from(self.columns / 2)
    }

    /// Grid cell to centered room coordinates.
    ///
    /// Returns `None` when the result does not fit in `i32`, which only
    /// happens for cells far outside any real grid.
    pub fn to_room(&self, cell: GridCell) -> Option<RoomPoint> {
        let x = i64::from(cell.col) - self.half_columns();
        let y = self.half_rows() - i64::from(cell.row);
        Some(RoomPoint::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }

    /// Centered room coordinates to grid cell. Exact inverse of [`Self::to_room`].
    pub fn to_grid(&self, point: RoomPoint) -> Option<GridCell> {
        let row = self.half_rows() - i64::from(point.y);
        let col = i64::from(point.x) + self.half_columns();
        Some(GridCell::new(i32::try_from(row).ok()?, i32::try_from(col).ok()?))
    }

    /// The whole grid, `[0, rows) x [0, columns)`.
    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.columns, self.rows)
    }

    /// The placeable area inside the border margin. Empty when the room is
    /// too small to leave any interior.
    pub fn interior(&self) -> CellRect {
        let b = self.border;
        let offset = i32::try_from(b).unwrap_or(i32::MAX);
        CellRect::new(
            offset,
            offset,
            self.columns.saturating_sub(b.saturating_mul(2)),
            self.rows.saturating_sub(b.saturating_mul(2)),
        )
    }

    /// True for cells inside the grid that fall in the reserved border.
    pub fn is_border_cell(&self, cell: GridCell) -> bool {
        self.bounds().contains_cell(cell) && !self.interior().contains_cell(cell)
    }

    /// Cell rectangle covered by an item anchored at a room position, or
    /// `None` if the anchor has no grid cell.
    pub fn footprint_rect(&self, position: RoomPoint, footprint: Footprint) -> Option<CellRect> {
        self.to_grid(position).map(|cell| CellRect::at(cell, footprint))
    }

    /// Cell rectangle for placing an item at `position`, checked against the
    /// grid bounds and border.
    pub fn placement_rect(
        &self,
        position: RoomPoint,
        footprint: Footprint,
    ) -> Result<CellRect, PlacementError> {
        let rect = self.footprint_rect(position, footprint).ok_or_else(|| {
            let row = clamp_i32(self.half_rows() - i64::from(position.y));
            let col = clamp_i32(i64::from(position.x) + self.half_columns());
            PlacementError::OutOfBounds {
                row,
                col,
                width: footprint.width,
                height: footprint.height,
            }
        })?;
        self.check_bounds(&rect)?;
        Ok(rect)
    }

    /// Checks that `rect` stays inside the grid and clear of the border.
    pub fn check_bounds(&self, rect: &CellRect) -> Result<(), PlacementError> {
        if self.bounds().contains_rect(rect) && self.interior().contains_rect(rect) {
            Ok(())
        } else {
            Err(PlacementError::OutOfBounds {
                row: rect.row,
                col: rect.col,
                width: rect.width,
                height: rect.height,
            })
        }
    }
}
