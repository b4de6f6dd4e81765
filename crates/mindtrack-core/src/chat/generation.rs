//! Reply generation state machine and the generator trait.
//!
//! A generation moves `Idle → Pending → {Fulfilled, Rejected}`. Generators never
//! retry; they return a [`GenerationError`] and leave the policy to the caller.

use super::history::HistoryEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the assistant turn shown when a generation is rejected.
pub const APOLOGY_PREFIX: &str = "I'm having trouble connecting to the AI service right now. ";

/// Which generator is answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// No credential: keyword-selected canned replies.
    Offline,
    /// Credential present: external chat-completion endpoint.
    Online,
}

/// Why a generation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationErrorKind {
    /// The endpoint returned an error payload or a non-success status.
    Endpoint,
    /// The endpoint refused the credential (HTTP 401).
    Unauthorized,
    /// The request never produced a response.
    Network,
    /// The response body could not be understood.
    Parse,
    /// The conversation's cancellation scope fired while pending.
    Cancelled,
}

/// A rejected generation with whatever detail is available.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind:?}: {detail}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub detail: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn endpoint(detail: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Endpoint, detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Unauthorized, detail)
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Network, detail)
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Parse, detail)
    }

    pub fn cancelled() -> Self {
        Self::new(GenerationErrorKind::Cancelled, "request cancelled")
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == GenerationErrorKind::Cancelled
    }

    /// True when the user should be pointed at the credential settings.
    pub fn is_credential_problem(&self) -> bool {
        self.kind == GenerationErrorKind::Unauthorized
    }

    /// The assistant-visible text for this rejection.
    pub fn apology(&self) -> String {
        format!("{APOLOGY_PREFIX}{}", self.detail)
    }
}

/// Current state of the conversation's generator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Pending,
    Fulfilled(String),
    Rejected(GenerationError),
}

impl GenerationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationState::Pending)
    }

    /// Resolves a generator result into a terminal state.
    pub fn resolve(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => GenerationState::Fulfilled(text),
            Err(err) => GenerationState::Rejected(err),
        }
    }
}

/// How a new user turn was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Free text from the input box. Must be non-empty after trim.
    Typed(String),
    /// A pre-set mood chip. Always accepted.
    Chip(String),
}

impl UserInput {
    pub fn text(&self) -> &str {
        match self {
            UserInput::Typed(text) | UserInput::Chip(text) => text,
        }
    }

    /// Applies the `Idle → Pending` guard.
    pub fn accepted(&self) -> bool {
        match self {
            UserInput::Typed(text) => !text.trim().is_empty(),
            UserInput::Chip(_) => true,
        }
    }
}

/// Reasons a send is refused before any generation starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a reply is still being generated")]
    Busy,
    #[error("conversation is closed")]
    Closed,
}

/// Produces the assistant reply for a new user turn.
///
/// `history` is the committed context before `input`; implementations must not
/// mutate any conversation state.
#[async_trait::async_trait]
pub trait ResponseGenerator: Send + Sync {
    fn mode(&self) -> GenerationMode;

    async fn generate(
        &self,
        history: &[HistoryEntry],
        input: &str,
    ) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apology_contains_prefix_and_detail() {
        let err = GenerationError::endpoint("Incorrect API key provided");
        let text = err.apology();
        assert!(text.starts_with(APOLOGY_PREFIX));
        assert!(text.contains("Incorrect API key provided"));
    }

    #[test]
    fn test_input_guard() {
        assert!(!UserInput::Typed("   ".into()).accepted());
        assert!(UserInput::Typed(" hi ".into()).accepted());
        assert!(UserInput::Chip(String::new()).accepted());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            GenerationState::resolve(Ok("hi".into())),
            GenerationState::Fulfilled("hi".into())
        );
        let rejected = GenerationState::resolve(Err(GenerationError::cancelled()));
        assert!(matches!(rejected, GenerationState::Rejected(ref e) if e.is_cancelled()));
        assert!(!rejected.is_pending());
    }
}
