//! Chat domain module.
//!
//! # Module Structure
//!
//! - `turn`: Visible chat turns (`ChatTurn`, `Sender`)
//! - `history`: Context projection sent to the endpoint (`HistoryEntry`, `ConversationHistory`)
//! - `conversation`: Turn sequence plus history (`Conversation`)
//! - `reply`: Ordered keyword rules for offline replies
//! - `generation`: Generation state machine and the `ResponseGenerator` trait
//! - `export`: Text and JSON transcripts

mod conversation;
pub mod export;
mod generation;
mod history;
pub mod reply;
mod turn;

// Re-export public API
pub use conversation::{Conversation, GREETING, MOOD_CHIPS};
pub use export::{TranscriptDocument, TranscriptFormat};
pub use generation::{
    APOLOGY_PREFIX, GenerationError, GenerationErrorKind, GenerationMode, GenerationState,
    ResponseGenerator, SendError, UserInput,
};
pub use history::{ConversationHistory, HistoryEntry, HistoryRole};
pub use reply::{ReplyRule, select_canned_reply};
pub use turn::{ChatTurn, Sender};
