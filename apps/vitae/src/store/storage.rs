//! Durable local key-value storage for the document blob.
//!
//! The store persists a single serialized blob under [`STORAGE_KEY`] after
//! every mutation, fire-and-forget. Backends must not fail on the happy path;
//! when they do fail, the caller logs and moves on.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::{ResumeData, SectionKind};
use crate::models::settings::ResumeSettings;

/// Fixed key the whole document state lives under.
pub const STORAGE_KEY: &str = "resume-storage";

/// Shape of the persisted blob: document, render settings, and the active
/// editor section, serialized together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub resume_data: ResumeData,
    pub settings: ResumeSettings,
    pub active_section: SectionKind,
}

/// Get/set/clear by key. Implementations are synchronous; the store treats
/// every call as fire-and-forget.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value, or `None` if the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn clear(&self, key: &str) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed storage
// ────────────────────────────────────────────────────────────────────────────

/// One JSON file per key inside a root directory.
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileStorage { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.root)?;
        // Write-then-rename so a crash mid-write never corrupts the blob.
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory storage
// ────────────────────────────────────────────────────────────────────────────

/// Map-backed storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), AppError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
