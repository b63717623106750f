//! Save, load and export operations for planner state.

use super::PlannerState;
use crate::history::EditKind;
use crate::serialization::{parse_layout, ExportLayout, LayoutFile};
use crate::store::LayoutStore;
use roomkit_core::{LayoutError, PersistenceError};

impl PlannerState {
    /// Stored form of the current state.
    pub fn to_layout_file(&self) -> LayoutFile {
        LayoutFile::from_snapshot(self.layout_name.clone(), &self.snapshot())
    }

    /// Render form of the current state.
    pub fn export_layout(&self) -> ExportLayout {
        ExportLayout::from_snapshot(&self.snapshot(), &self.catalog)
    }

    /// Saves the layout under `key` and clears the modified flag.
    pub fn save_to_store(
        &mut self,
        store: &mut dyn LayoutStore,
        key: &str,
    ) -> Result<(), PersistenceError> {
        let json = self.to_layout_file().to_json()?;
        if let Err(e) = store.save(key, &json) {
            tracing::warn!("Failed to save layout '{}': {}", key, e);
            return Err(e);
        }

        self.current_key = Some(key.to_string());
        self.is_modified = false;
        tracing::info!("Saved layout '{}' ({} items)", key, self.items.len());
        Ok(())
    }

    /// Writes the layout under `key` without touching the modified flag.
    pub fn autosave_to_store(
        &self,
        store: &mut dyn LayoutStore,
        key: &str,
    ) -> Result<(), PersistenceError> {
        let json = self.to_layout_file().to_json()?;
        store.save(key, &json)?;
        tracing::debug!("Autosaved layout to '{}'", key);
        Ok(())
    }

    /// Loads the layout stored under `key`, replacing the current state.
    ///
    /// Returns `Ok(false)` and leaves the state alone when the key holds
    /// nothing. A malformed layout or a store failure also leaves the state
    /// untouched.
    pub fn load_from_store(
        &mut self,
        store: &dyn LayoutStore,
        key: &str,
    ) -> roomkit_core::Result<bool> {
        let Some(raw) = store.load(key)? else {
            tracing::info!("No layout stored under '{}'", key);
            return Ok(false);
        };

        self.load_layout_str(&raw)?;
        self.current_key = Some(key.to_string());
        tracing::info!("Loaded layout '{}' ({} items)", key, self.items.len());
        Ok(true)
    }

    /// Replaces the current state with a stored layout document.
    ///
    /// History is re-seeded with the loaded layout as its only entry.
    pub fn load_layout_str(&mut self, raw: &str) -> Result<(), LayoutError> {
        let layout = match parse_layout(raw) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::warn!("Rejected layout: {}", e);
                return Err(e);
            }
        };
        self.apply_layout(layout)
    }

    fn apply_layout(&mut self, layout: LayoutFile) -> Result<(), LayoutError> {
        let snapshot = layout.to_snapshot()?;

        if let Some(max_id) = snapshot.max_id() {
            self.next_id = self.next_id.max(max_id + 1);
        }
        self.history.reset(
            EditKind::LayoutLoaded,
            format!("Load {}", layout.metadata.name),
            snapshot.clone(),
        );
        self.restore(snapshot);
        self.layout_name = layout.metadata.name;
        self.is_modified = false;

        let overlaps = self.occupancy().overlapping_pairs();
        if !overlaps.is_empty() {
            tracing::warn!("Loaded layout has {} overlapping pair(s)", overlaps.len());
        }
        Ok(())
    }

    /// Writes the render form under `key`.
    pub fn export_to_store(
        &self,
        store: &mut dyn LayoutStore,
        key: &str,
    ) -> Result<(), PersistenceError> {
        let json = self.export_layout().to_json()?;
        store.save(key, &json)?;
        tracing::info!("Exported layout to '{}'", key);
        Ok(())
    }

    /// Save layout to file.
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        self.to_layout_file().save_to_file(&path)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load layout from file.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let layout = LayoutFile::load_from_file(&path)?;
        self.apply_layout(layout)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }
}
