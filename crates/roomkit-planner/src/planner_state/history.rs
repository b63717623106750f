//! Undo/redo operations for planner state.

use super::PlannerState;
use crate::history::HistoryManager;

impl PlannerState {
    /// Reverts the last edit. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.is_modified = true;
        tracing::debug!("Undo, {} step(s) left", self.history.undo_depth());
        true
    }

    /// Re-applies the last undone edit. Returns `false` if there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.is_modified = true;
        tracing::debug!("Redo, {} step(s) left", self.history.redo_depth());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }
}
