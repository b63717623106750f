//! Undo/redo history of layout snapshots.
//!
//! History is a linear sequence of full snapshots plus a cursor. Undo and
//! redo only move the cursor; the planner then replaces its state with the
//! snapshot under the cursor, so no edit needs an inverse.

use crate::model::LayoutSnapshot;
use chrono::{DateTime, Utc};
use std::fmt;

/// Kind of edit that produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// First entry of a fresh planner
    Initial,
    ItemAdded,
    ItemMoved,
    ItemRotated,
    ItemFlipped,
    ItemRemoved,
    RoomResized,
    LayoutReset,
    LayoutLoaded,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initial => "New Layout",
            Self::ItemAdded => "Add Item",
            Self::ItemMoved => "Move Item",
            Self::ItemRotated => "Rotate Item",
            Self::ItemFlipped => "Flip Item",
            Self::ItemRemoved => "Remove Item",
            Self::RoomResized => "Resize Room",
            Self::LayoutReset => "Reset Layout",
            Self::LayoutLoaded => "Load Layout",
        };
        f.write_str(label)
    }
}

/// One recorded state of the layout
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub kind: EditKind,
    pub description: String,
    pub snapshot: LayoutSnapshot,
    pub recorded_at: DateTime<Utc>,
}

/// Snapshot history with a cursor and a bounded depth.
///
/// The history is never empty: it is seeded with the state the planner
/// starts from, and the cursor always points at the entry matching the
/// planner's current state.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    max_depth: usize,
}

impl HistoryManager {
    /// Creates a history seeded with `seed`, keeping at most `max_depth`
    /// snapshots (at least one).
    pub fn new(seed: LayoutSnapshot, max_depth: usize) -> Self {
        let mut manager = Self {
            entries: Vec::new(),
            cursor: 0,
            max_depth: max_depth.max(1),
        };
        manager.reset(EditKind::Initial, "New layout".to_string(), seed);
        manager
    }

    /// Drops all entries and seeds the history with a single snapshot.
    pub fn reset(&mut self, kind: EditKind, description: String, seed: LayoutSnapshot) {
        self.entries.clear();
        self.entries.push(HistoryEntry {
            kind,
            description,
            snapshot: seed,
            recorded_at: Utc::now(),
        });
        self.cursor = 0;
    }

    /// Records a new snapshot after the cursor.
    ///
    /// Entries after the cursor (the redo branch) are discarded. When the
    /// depth limit is exceeded the oldest entries are dropped.
    pub fn record(&mut self, kind: EditKind, description: String, snapshot: LayoutSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            kind,
            description,
            snapshot,
            recorded_at: Utc::now(),
        });

        if self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry and returns the snapshot now current.
    pub fn undo(&mut self) -> Option<&LayoutSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].snapshot)
    }

    /// Steps forward one entry and returns the snapshot now current.
    pub fn redo(&mut self) -> Option<&LayoutSnapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].snapshot)
    }

    pub fn current(&self) -> &LayoutSnapshot {
        &self.entries[self.cursor].snapshot
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of edits that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of edits that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    /// Description of the edit the next undo would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.can_undo()
            .then(|| self.entries[self.cursor].description.as_str())
    }

    /// Description of the edit the next redo would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.can_redo()
            .then(|| self.entries[self.cursor + 1].description.as_str())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true once constructed: the seed entry is always kept.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
