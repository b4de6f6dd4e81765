//! Focus settings persisted under the `focus_settings` key.

use crate::local_store::LocalStore;
use mindtrack_core::error::Result;
use mindtrack_core::focus::{FocusSettings, FocusSettingsRepository};

pub const FOCUS_SETTINGS_KEY: &str = "focus_settings";

#[derive(Clone)]
pub struct LocalFocusSettingsRepository {
    store: LocalStore,
}

impl LocalFocusSettingsRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }
}

impl FocusSettingsRepository for LocalFocusSettingsRepository {
    fn load(&self) -> Result<FocusSettings> {
        match self.store.get_json::<FocusSettings>(FOCUS_SETTINGS_KEY) {
            Ok(Some(settings)) => match settings.validate() {
                Ok(()) => Ok(settings),
                Err(e) => {
                    tracing::warn!("Ignoring out-of-range focus settings: {}", e);
                    Ok(FocusSettings::default())
                }
            },
            Ok(None) => Ok(FocusSettings::default()),
            Err(e) if e.is_serialization() => {
                tracing::warn!("Ignoring unreadable focus settings: {}", e);
                Ok(FocusSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, settings: &FocusSettings) -> Result<()> {
        settings.validate()?;
        self.store.set_json(FOCUS_SETTINGS_KEY, settings)?;
        tracing::debug!(
            "Saved focus settings: focus={}m break={}m",
            settings.focus_time,
            settings.break_time
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_unset() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(Some(temp_dir.path())).unwrap();
        let repo = LocalFocusSettingsRepository::new(store);

        assert_eq!(repo.load().unwrap(), FocusSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(Some(temp_dir.path())).unwrap();
        let repo = LocalFocusSettingsRepository::new(store.clone());

        let settings = FocusSettings {
            focus_time: 50,
            break_time: 10,
            enable_notifications: false,
        };
        repo.save(&settings).unwrap();

        assert_eq!(repo.load().unwrap(), settings);
        assert_eq!(
            store.get_item(FOCUS_SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"focusTime":50,"breakTime":10,"enableNotifications":false}"#)
        );
    }

    #[test]
    fn test_invalid_settings_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(Some(temp_dir.path())).unwrap();
        let repo = LocalFocusSettingsRepository::new(store);

        let settings = FocusSettings {
            focus_time: 3,
            ..Default::default()
        };
        assert!(repo.save(&settings).unwrap_err().is_invalid_input());
        assert_eq!(repo.load().unwrap(), FocusSettings::default());
    }

    #[test]
    fn test_corrupt_value_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(Some(temp_dir.path())).unwrap();
        store.set_item(FOCUS_SETTINGS_KEY, "{broken").unwrap();

        let repo = LocalFocusSettingsRepository::new(store);
        assert_eq!(repo.load().unwrap(), FocusSettings::default());
    }

    #[test]
    fn test_out_of_range_value_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(Some(temp_dir.path())).unwrap();
        store
            .set_item(
                FOCUS_SETTINGS_KEY,
                r#"{"focusTime":100000000,"breakTime":5,"enableNotifications":true}"#,
            )
            .unwrap();

        let repo = LocalFocusSettingsRepository::new(store);
        assert_eq!(repo.load().unwrap(), FocusSettings::default());
    }
}
