//! Storage backends for the persisted message sequence.
//!
//! Tab-scoped storage is modeled as one key holding the serialized history.
//! The session core never touches a concrete backend directly; hosts inject
//! whatever maps onto their tab lifetime.

use std::path::PathBuf;
use std::sync::Mutex;

use parley_core::error::{ParleyError, Result};

/// Injected storage capability for one session's history.
///
/// Semantics match a single tab-scoped key: `read` returns the raw
/// serialized sequence if present, `write` replaces it whole, `clear`
/// removes it. Single writer; no cross-tab sharing assumed.
pub trait HistoryStore: Send + Sync {
    /// Read the stored serialized history, if any.
    fn read(&self) -> Result<Option<String>>;
    /// Replace the stored serialized history.
    fn write(&self, raw: &str) -> Result<()>;
    /// Remove the stored history. Absent is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-process store for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| ParleyError::Storage(format!("store lock poisoned: {}", e)))?;
        Ok(slot.clone())
    }

    fn write(&self, raw: &str) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| ParleyError::Storage(format!("store lock poisoned: {}", e)))?;
        *slot = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| ParleyError::Storage(format!("store lock poisoned: {}", e)))?;
        *slot = None;
        Ok(())
    }
}

/// File-backed store: one file per session key.
///
/// Hosts that map a session onto a temp file get tab-like lifetime by
/// deleting the file on unload via `clear`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for FileStore {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ParleyError::Storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw).map_err(|e| {
            ParleyError::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ParleyError::Storage(format!(
                "failed to clear {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
