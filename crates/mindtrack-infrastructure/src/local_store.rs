//! Key/value store backed by `local_storage.json`.
//!
//! Every value is a string. Structured values (focus settings, the user
//! record) are stored as JSON text under their key.

use crate::paths::MindTrackPaths;
use crate::storage::{AtomicFileError, AtomicJsonFile};
use mindtrack_core::MindTrackError;
use mindtrack_core::error::Result;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

type Entries = BTreeMap<String, String>;

/// Persistent string map shared by the credential, focus and account stores.
///
/// Reads are served from an in-memory cache loaded on first access. Writes
/// go through a locked atomic update and refresh the cache. The file is
/// written owner-only because it holds the API credential.
#[derive(Clone)]
pub struct LocalStore {
    file: Arc<AtomicJsonFile<Entries>>,
    cache: Arc<RwLock<Option<Entries>>>,
}

impl LocalStore {
    /// Opens the store under the default config directory.
    pub fn open_default() -> Result<Self> {
        Self::open(None)
    }

    /// Opens the store under `base_path`, or the default config directory.
    pub fn open(base_path: Option<&Path>) -> Result<Self> {
        let path = MindTrackPaths::new(base_path)
            .local_storage_file()
            .map_err(|e| MindTrackError::config(format!("Failed to get storage path: {}", e)))?;
        Ok(Self::at(path))
    }

    /// Uses `path` directly as the backing file.
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path).private()),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the value under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.write(move |entries| {
            entries.insert(key, value);
        })
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.write(move |entries| {
            entries.remove(&key);
        })
    }

    /// Decodes the JSON text under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stores `value` as JSON text under `key`.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    fn entries(&self) -> Result<Entries> {
        {
            let read_lock = self
                .cache
                .read()
                .map_err(|_| MindTrackError::internal("local store cache poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.file.load()?.unwrap_or_default();

        {
            let mut write_lock = self
                .cache
                .write()
                .map_err(|_| MindTrackError::internal("local store cache poisoned"))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        if let Err(AtomicFileError::JsonError(e)) = self.file.load() {
            let moved = self.file.quarantine()?;
            tracing::warn!(
                "Unreadable local storage moved to {}: {}",
                moved.display(),
                e
            );
        }

        let updated = self.file.update(Entries::new(), |entries| {
            f(entries);
            Ok(entries.clone())
        })?;

        let mut write_lock = self
            .cache
            .write()
            .map_err(|_| MindTrackError::internal("local store cache poisoned"))?;
        *write_lock = Some(updated);
        Ok(())
    }
}
