//! Conversation history projection.
//!
//! The history is the reduced `{role, content}` view of the chat that is sent
//! to the completion endpoint as context. It never contains system entries;
//! the system prompt is injected by the client at call time.

use serde::{Deserialize, Serialize};

/// Role of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl HistoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRole::User => "user",
            HistoryRole::Assistant => "assistant",
        }
    }
}

/// One `{role, content}` entry of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chronological history that starts with a user entry and strictly alternates.
///
/// Entries can only be added as a completed `(user, assistant)` exchange, so
/// the alternation holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fulfilled exchange.
    pub fn commit_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.entries.push(HistoryEntry::user(user));
        self.entries.push(HistoryEntry::assistant(assistant));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns true when the entries start with `user` and alternate.
    pub fn is_well_formed(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, entry)| {
            let expected = if i % 2 == 0 {
                HistoryRole::User
            } else {
                HistoryRole::Assistant
            };
            entry.role == expected
        })
    }
}
