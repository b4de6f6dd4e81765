//! API credential model and storage trait.

use crate::error::{MindTrackError, Result};
use std::fmt;

/// The secret used to authenticate against the completion endpoint.
///
/// Always non-empty and stored trimmed. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validates a raw value. Surrounding whitespace is dropped.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MindTrackError::credential("Please enter a valid API key."));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form for display, e.g. `sk-t…cdef`.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Persistent storage for the single API credential.
///
/// # Security Note
///
/// Implementations store the secret in plaintext. They should restrict file
/// permissions and must never log the value.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored secret or an empty string.
    fn get(&self) -> String;

    /// Validates and persists `value`. An empty value after trim is refused.
    fn set(&self, value: &str) -> Result<Credential>;

    /// Removes the stored secret.
    fn clear(&self) -> Result<()>;

    /// The stored secret as a validated credential, if any.
    fn credential(&self) -> Option<Credential> {
        Credential::parse(&self.get()).ok()
    }
}
