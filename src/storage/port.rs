//! Persistence port
//!
//! The ledger persists through a string-keyed slot store. Each slot holds a
//! whole serialized collection and is overwritten in full on every write.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{TallyError, TallyResult};

use super::file_io::{read_text, write_atomic};

/// Durable key-value text store used by the repositories
pub trait PersistencePort: Send + Sync {
    /// Read a slot, `None` if it has never been written
    fn get(&self, key: &str) -> TallyResult<Option<String>>;

    /// Overwrite a slot
    fn set(&self, key: &str, value: &str) -> TallyResult<()>;
}

/// In-process port, used by tests and as a scratch ledger
#[derive(Debug, Default)]
pub struct MemoryPort {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryPort {
    /// Create an empty memory port
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory port with a pre-filled slot
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let port = Self::new();
        if let Ok(mut slots) = port.slots.write() {
            slots.insert(key.into(), value.into());
        }
        port
    }
}

impl PersistencePort for MemoryPort {
    fn get(&self, key: &str) -> TallyResult<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TallyResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Port backed by one JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FilePort {
    dir: PathBuf,
}

impl FilePort {
    /// Create a file port rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing a key
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PersistencePort for FilePort {
    fn get(&self, key: &str) -> TallyResult<Option<String>> {
        read_text(self.slot_path(key))
    }

    fn set(&self, key: &str, value: &str) -> TallyResult<()> {
        write_atomic(self.slot_path(key), value.as_bytes())
    }
}
