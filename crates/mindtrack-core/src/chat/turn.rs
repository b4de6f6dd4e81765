//! Chat turn types.
//!
//! A turn is one message shown in the chat view, tagged by who sent it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed or chip-selected by the student.
    User,
    /// Produced by the response generator.
    Ai,
}

impl Sender {
    /// Label used in exported transcripts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Ai => "MindTrack AI",
        }
    }
}

/// A single immutable message in the chat view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Timestamp-derived identifier, unique within the process.
    pub id: String,
    /// The text of the message.
    pub content: String,
    /// Who sent the message.
    pub sender: Sender,
    /// When the turn was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Creates a turn stamped with the current time.
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        let timestamp = Utc::now();
        Self {
            id: next_turn_id(&timestamp),
            content: content.into(),
            sender,
            timestamp,
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Creates an AI turn.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Sender::Ai, content)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

static LAST_TURN_ID: AtomicI64 = AtomicI64::new(0);

/// Returns the millisecond timestamp as an id, bumped past the last issued id
/// so two turns created in the same millisecond never collide.
fn next_turn_id(timestamp: &DateTime<Utc>) -> String {
    let candidate = timestamp.timestamp_millis();
    let mut last = LAST_TURN_ID.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(last + 1);
        match LAST_TURN_ID.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(actual) => last = actual,
        }
    }
}
