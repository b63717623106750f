//! Layout stores.
//!
//! The planner never performs I/O on its own; it hands serialized layouts
//! to a [`LayoutStore`] at explicit save, load and export calls.

use roomkit_core::PersistenceError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key/value store for serialized layouts
pub trait LayoutStore {
    /// Stores `data` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, data: &str) -> Result<(), PersistenceError>;

    /// Returns the value stored under `key`, or `None` if there is none.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Deletes `key`. Returns `false` if it did not exist.
    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError>;

    fn contains(&self, key: &str) -> Result<bool, PersistenceError> {
        Ok(self.load(key)?.is_some())
    }
}

/// Store keeping one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `directory`. The directory is created on
    /// first save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File backing `key`. Keys are limited to ASCII letters, digits, `-`,
    /// `_` and `.`, and may not start with `.`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(PersistenceError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl LayoutStore for FileStore {
    fn save(&mut self, key: &str, data: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        let io_err = |source: std::io::Error| PersistenceError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.directory).map_err(io_err)?;
        std::fs::write(&path, data).map_err(io_err)?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory store, the equivalent of browser local storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LayoutStore for MemoryStore {
    fn save(&mut self, key: &str, data: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        Ok(self.entries.remove(key).is_some())
    }
}
