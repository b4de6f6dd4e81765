//! In-memory conversation state.

use super::generation::GenerationError;
use super::history::{ConversationHistory, HistoryEntry};
use super::turn::ChatTurn;

/// Opening assistant turn of every new conversation.
pub const GREETING: &str = "Hi there! I'm your MindTrack assistant. How are you feeling today?";

/// Mood quick-select values, in display order.
pub const MOOD_CHIPS: [&str; 5] = ["Happy", "Stressed", "Tired", "Motivated", "Anxious"];

/// Chips are offered only while the conversation is this short.
const MOOD_CHIP_TURN_LIMIT: usize = 2;

/// Append-only turn sequence plus the history projection sent as context.
///
/// The greeting is a visible turn only; it never enters the history. A user
/// turn reaches the history together with its reply once the generation is
/// fulfilled, so a rejected generation leaves the history untouched.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    history: ConversationHistory,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Creates a conversation that opens with the greeting.
    pub fn new() -> Self {
        Self {
            turns: vec![ChatTurn::ai(GREETING)],
            history: ConversationHistory::new(),
        }
    }

    /// Creates a conversation with no turns at all.
    pub fn empty() -> Self {
        Self {
            turns: Vec::new(),
            history: ConversationHistory::new(),
        }
    }

    /// Appends the user turn that starts a generation.
    pub fn push_user(&mut self, content: impl Into<String>) -> ChatTurn {
        let turn = ChatTurn::user(content);
        self.turns.push(turn.clone());
        turn
    }

    /// Appends a fulfilled reply and commits the exchange to the history.
    pub fn record_reply(&mut self, user_text: &str, reply: impl Into<String>) -> ChatTurn {
        let turn = ChatTurn::ai(reply);
        self.history.commit_exchange(user_text, turn.content.clone());
        self.turns.push(turn.clone());
        turn
    }

    /// Appends the apology turn for a rejected generation.
    pub fn record_rejection(&mut self, error: &GenerationError) -> ChatTurn {
        let turn = ChatTurn::ai(error.apology());
        self.turns.push(turn.clone());
        turn
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Whether the mood chips should be offered.
    pub fn shows_mood_chips(&self) -> bool {
        self.turns.len() <= MOOD_CHIP_TURN_LIMIT
    }

    /// Discards every turn and the history, then restores the greeting.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
