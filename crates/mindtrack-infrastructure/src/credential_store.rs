//! Credential store backed by [`LocalStore`].

use crate::local_store::LocalStore;
use mindtrack_core::error::Result;
use mindtrack_core::secret::{Credential, CredentialStore};

/// Key under which the API credential is stored.
pub const CREDENTIAL_KEY: &str = "openai_api_key";

/// Stores the API credential in `local_storage.json`.
///
/// # Example
///
/// ```no_run
/// use mindtrack_core::secret::CredentialStore;
/// use mindtrack_infrastructure::{LocalCredentialStore, LocalStore};
///
/// let store = LocalCredentialStore::new(LocalStore::open_default()?);
/// store.set("sk-my-key")?;
/// assert_eq!(store.get(), "sk-my-key");
/// # Ok::<(), mindtrack_core::MindTrackError>(())
/// ```
#[derive(Clone)]
pub struct LocalCredentialStore {
    store: LocalStore,
}

impl LocalCredentialStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }
}

impl CredentialStore for LocalCredentialStore {
    fn get(&self) -> String {
        match self.store.get_item(CREDENTIAL_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read stored credential: {}", e);
                String::new()
            }
        }
    }

    fn set(&self, value: &str) -> Result<Credential> {
        let credential = Credential::parse(value)?;
        self.store.set_item(CREDENTIAL_KEY, credential.expose())?;
        tracing::info!("API credential saved ({})", credential.masked());
        Ok(credential)
    }

    fn clear(&self) -> Result<()> {
        self.store.remove_item(CREDENTIAL_KEY)?;
        tracing::info!("API credential cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> LocalCredentialStore {
        LocalCredentialStore::new(LocalStore::open(Some(temp_dir.path())).unwrap())
    }

    #[test]
    fn test_get_without_credential_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        assert_eq!(store.get(), "");
        assert!(store.credential().is_none());
    }

    #[test]
    fn test_set_trims_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        store(&temp_dir).set("  sk-test  ").unwrap();

        let reopened = store(&temp_dir);
        assert_eq!(reopened.get(), "sk-test");
        assert_eq!(
            reopened.credential().map(|c| c.expose().to_string()),
            Some("sk-test".to_string())
        );
    }

    #[test]
    fn test_set_over_corrupt_storage() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        std::fs::write(store.store.path(), "{ not json").unwrap();
        assert_eq!(store.get(), "");

        store.set("sk-test").unwrap();

        assert_eq!(store.get(), "sk-test");
        assert_eq!(
            LocalCredentialStore::new(LocalStore::open(Some(temp_dir.path())).unwrap()).get(),
            "sk-test"
        );
    }

    #[test]
    fn test_blank_is_rejected_and_keeps_previous() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.set("sk-first").unwrap();

        let err = store.set("   ").unwrap_err();
        assert!(err.is_credential());
        assert_eq!(store.get(), "sk-first");
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.set("sk-test").unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(), "");
        assert_eq!(store.store.get_item(CREDENTIAL_KEY).unwrap(), None);
    }

    #[test]
    fn test_other_keys_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let local = LocalStore::open(Some(temp_dir.path())).unwrap();
        local.set_item("user", "{}").unwrap();

        let store = LocalCredentialStore::new(local.clone());
        store.set("sk-test").unwrap();
        store.clear().unwrap();

        assert_eq!(local.get_item("user").unwrap().as_deref(), Some("{}"));
    }
}
