//! Unified path management for MindTrack files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mindtrack/          # Config directory (platform config dir)
//! ├── config.toml               # Application configuration
//! ├── local_storage.json        # Key/value store: credential, focus settings, user
//! └── logs/                     # Application logs
//!     └── mindtrack.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "mindtrack";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file MindTrack reads or writes.
///
/// With a base path (tests, `--data-dir`) everything lives directly under it;
/// otherwise under `<platform config dir>/mindtrack`.
#[derive(Debug, Clone, Default)]
pub struct MindTrackPaths {
    base: Option<PathBuf>,
}

impl MindTrackPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the MindTrack configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the key/value store.
    ///
    /// # Security Note
    ///
    /// This file holds the API credential in plaintext. It is written with
    /// mode 600 on Unix.
    pub fn local_storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("local_storage.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
