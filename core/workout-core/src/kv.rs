//! Key-value backends for the record store.
//!
//! Values are opaque strings (JSON text). The record store is the only caller
//! and decides what a missing key or unreadable value means.
//!
//! ## Backends
//!
//! - [`FileStore`]: one `<key>.json` file per key; writes use temp file + rename
//! - [`MemoryStore`]: process-local map, used by tests and embedders

use crate::error::{Result, WorkoutError};
use crate::storage::StorageConfig;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Minimal string key-value storage.
///
/// Implementations report failures; they never swallow them.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value at `key` entirely.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// File Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Stores each key as a JSON file under the configured root.
#[derive(Debug, Clone)]
pub struct FileStore {
    storage: StorageConfig,
}

impl FileStore {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.storage.key_file(key);
        match fs_err::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WorkoutError::Io {
                context: format!("reading {}", path.display()),
                source: e,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.ensure_dirs().map_err(|e| WorkoutError::Io {
            context: format!("creating data directory {}", self.storage.root().display()),
            source: e,
        })?;
        atomic_write(&self.storage.key_file(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.storage.key_file(key);
        match fs_err::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WorkoutError::Io {
                context: format!("removing {}", path.display()),
                source: e,
            }),
        }
    }
}

/// Writes content to a file atomically using temp file + rename.
///
/// The rename is atomic on the same filesystem, so readers see either the old
/// snapshot or the new one.
fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| WorkoutError::Io {
        context: format!("creating temp file in {}", dir.display()),
        source: e,
    })?;

    tmp.write_all(contents.as_bytes())
        .map_err(|e| WorkoutError::Io {
            context: format!("writing temp file for {}", path.display()),
            source: e,
        })?;

    tmp.flush().map_err(|e| WorkoutError::Io {
        context: format!("flushing temp file for {}", path.display()),
        source: e,
    })?;

    tmp.persist(path).map_err(|e| WorkoutError::Io {
        context: format!("persisting temp file to {}", path.display()),
        source: e.error,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Backend
// ─────────────────────────────────────────────────────────────────────────────

/// In-process store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }

    /// Raw value at a key, bypassing the record store.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

fn poisoned() -> WorkoutError {
    WorkoutError::Io {
        context: "memory store lock poisoned".to_string(),
        source: std::io::Error::new(ErrorKind::Other, "poisoned lock"),
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
