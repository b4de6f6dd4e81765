//! Account service trait.

use super::model::UserStub;
use crate::error::Result;

/// Stub authentication backed by local storage.
///
/// Passwords are accepted and ignored. This exists so the rest of the
/// application can ask "who is signed in", not to secure anything.
pub trait AccountService: Send + Sync {
    /// Signs in as `email`.
    fn login(&self, email: &str, password: &str) -> Result<UserStub>;

    /// Registers and signs in as `name <email>`.
    fn signup(&self, name: &str, email: &str, password: &str) -> Result<UserStub>;

    /// Forgets the signed-in user.
    fn logout(&self) -> Result<()>;

    /// Returns the signed-in user, if any.
    fn current(&self) -> Result<Option<UserStub>>;

    fn is_authenticated(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }
}
