//! Stub account service persisted under the `user` key.

use crate::local_store::LocalStore;
use mindtrack_core::MindTrackError;
use mindtrack_core::error::Result;
use mindtrack_core::user::{AccountService, UserStub};

pub const USER_KEY: &str = "user";

/// Local sign-in that only records who is signed in.
#[derive(Clone)]
pub struct LocalAccountService {
    store: LocalStore,
}

impl LocalAccountService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    fn require(value: &str, field: &str) -> Result<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MindTrackError::invalid_input(format!("{field} is required")));
        }
        Ok(trimmed.to_string())
    }
}

impl AccountService for LocalAccountService {
    fn login(&self, email: &str, password: &str) -> Result<UserStub> {
        let email = Self::require(email, "email")?;
        Self::require(password, "password")?;

        let user = UserStub::new(None, email);
        self.store.set_json(USER_KEY, &user)?;
        tracing::info!("Signed in as {}", user.email);
        Ok(user)
    }

    fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserStub> {
        let name = Self::require(name, "name")?;
        let email = Self::require(email, "email")?;
        Self::require(password, "password")?;

        let user = UserStub::new(Some(name), email);
        self.store.set_json(USER_KEY, &user)?;
        tracing::info!("Registered {}", user.email);
        Ok(user)
    }

    fn logout(&self) -> Result<()> {
        self.store.remove_item(USER_KEY)?;
        tracing::info!("Signed out");
        Ok(())
    }

    fn current(&self) -> Result<Option<UserStub>> {
        Ok(self
            .store
            .get_json::<UserStub>(USER_KEY)?
            .filter(|user| user.is_logged_in))
    }
}
