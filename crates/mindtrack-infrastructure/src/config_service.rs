//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml`, creating the file
//! with defaults on first run.

use crate::paths::MindTrackPaths;
use crate::storage::AtomicTomlFile;
use mindtrack_core::MindTrackError;
use mindtrack_core::config::AppConfig;
use mindtrack_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches [`AppConfig`].
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<AppConfig>>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = MindTrackPaths::new(base_path)
            .config_file()
            .map_err(|e| MindTrackError::config(format!("Failed to get config path: {}", e)))?;
        Ok(Self::at(path))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file is created with defaults. An invalid file is reported
    /// as a `Config` error and left untouched.
    pub fn load(&self) -> Result<AppConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| MindTrackError::internal("config cache poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = match self.file.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let default_config = AppConfig::default();
                self.file.save(&default_config)?;
                tracing::info!("Created default config at {}", self.path().display());
                default_config
            }
            Err(e) => {
                return Err(MindTrackError::config(format!(
                    "Failed to read {}: {}",
                    self.path().display(),
                    e
                )));
            }
        };
        loaded.validate()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| MindTrackError::internal("config cache poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Validates and writes `config`, replacing the cached copy.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config.validate()?;
        self.file.save(config)?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| MindTrackError::internal("config cache poisoned"))?;
        *write_lock = Some(config.clone());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();

        let config = service.load().unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(service.path().exists());

        let written = fs::read_to_string(service.path()).unwrap();
        assert!(written.contains("gpt-3.5-turbo"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        fs::write(service.path(), "[assistant]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let config = service.load().unwrap();
        assert_eq!(config.assistant.model, "gpt-4o-mini");
        assert_eq!(config.assistant.max_tokens, 150);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        fs::write(service.path(), "[assistant]\ntemperature = 5.0\n").unwrap();

        assert!(matches!(service.load(), Err(MindTrackError::Config(_))));
    }

    #[test]
    fn test_unparseable_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();
        fs::write(service.path(), "[assistant\n").unwrap();

        assert!(matches!(service.load(), Err(MindTrackError::Config(_))));
    }

    #[test]
    fn test_save_updates_cache_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();

        let mut config = service.load().unwrap();
        config.assistant.offline_latency_ms = 0;
        service.save(&config).unwrap();
        assert_eq!(service.load().unwrap().assistant.offline_latency_ms, 0);

        service.invalidate_cache();
        let reloaded = ConfigService::new(Some(temp_dir.path())).unwrap();
        assert_eq!(reloaded.load().unwrap().assistant.offline_latency_ms, 0);
    }
}
