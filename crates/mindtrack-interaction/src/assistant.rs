//! ChatAssistant - owns one conversation and drives its generations.
//!
//! At most one generation is in flight. Each conversation has a cancellation
//! scope; every generation runs under a child of it, so [`ChatAssistant::close`]
//! stops everything and [`ChatAssistant::cancel_pending`] stops the current one.

use crate::canned::CannedResponder;
use crate::openai_client::OpenAIChatClient;
use mindtrack_core::chat::{
    ChatTurn, Conversation, GenerationError, GenerationMode, GenerationState, HistoryEntry,
    ResponseGenerator, SendError, UserInput,
};
use mindtrack_core::config::AssistantSettings;
use mindtrack_core::secret::Credential;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// How the reply to a sent turn turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The reply turn, already appended and committed to the history.
    Fulfilled(ChatTurn),
    /// The apology turn that was appended instead of a reply.
    Rejected { turn: ChatTurn, error: GenerationError },
    /// The generation was cancelled. No reply turn was appended.
    Cancelled,
}

/// Result of a successful [`ChatAssistant::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub user_turn: ChatTurn,
    pub reply: ReplyOutcome,
}

impl SendOutcome {
    /// True when the endpoint refused the credential.
    pub fn needs_credential(&self) -> bool {
        matches!(&self.reply, ReplyOutcome::Rejected { error, .. } if error.is_credential_problem())
    }
}

/// Chat session bound to one conversation.
pub struct ChatAssistant {
    settings: AssistantSettings,
    conversation: Mutex<Conversation>,
    state: Mutex<GenerationState>,
    generator: Mutex<Arc<dyn ResponseGenerator>>,
    scope: CancellationToken,
    current: Mutex<Option<CancellationToken>>,
}

impl ChatAssistant {
    /// Creates an assistant that answers online when `credential` is set and
    /// from canned replies otherwise.
    pub fn new(settings: AssistantSettings, credential: Option<Credential>) -> Self {
        let generator = generator_for(&settings, credential);
        Self::with_generator(settings, generator)
    }

    /// Creates an assistant around an arbitrary generator.
    pub fn with_generator(
        settings: AssistantSettings,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        tracing::info!("Chat assistant started in {:?} mode", generator.mode());
        Self {
            settings,
            conversation: Mutex::new(Conversation::new()),
            state: Mutex::new(GenerationState::Idle),
            generator: Mutex::new(generator),
            scope: CancellationToken::new(),
            current: Mutex::new(None),
        }
    }

    pub fn mode(&self) -> GenerationMode {
        lock(&self.generator).mode()
    }

    /// Switches generators after the credential changed. A generation that
    /// is already pending finishes with the previous one.
    pub fn set_credential(&self, credential: Option<Credential>) {
        let generator = generator_for(&self.settings, credential);
        tracing::info!("Chat assistant switched to {:?} mode", generator.mode());
        *lock(&self.generator) = generator;
    }

    pub fn state(&self) -> GenerationState {
        lock(&self.state).clone()
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).is_pending()
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Snapshot of the visible turns.
    pub fn turns(&self) -> Vec<ChatTurn> {
        lock(&self.conversation).turns().to_vec()
    }

    /// Snapshot of the committed history.
    pub fn history(&self) -> Vec<HistoryEntry> {
        lock(&self.conversation).history().to_vec()
    }

    pub fn shows_mood_chips(&self) -> bool {
        lock(&self.conversation).shows_mood_chips()
    }

    /// Appends the user turn and waits for the reply.
    ///
    /// Refuses empty typed input, a second send while one is pending, and any
    /// send after [`close`](Self::close). Dropping the returned future before
    /// it completes counts as a cancellation.
    pub async fn send(&self, input: UserInput) -> Result<SendOutcome, SendError> {
        if self.is_closed() {
            return Err(SendError::Closed);
        }
        if !input.accepted() {
            return Err(SendError::EmptyInput);
        }

        let text = input.text().to_string();

        // pending state, token and user turn appear together under the conversation lock
        let (pending, token, user_turn, history) = {
            let mut conversation = lock(&self.conversation);
            if self.is_closed() {
                return Err(SendError::Closed);
            }
            let pending = PendingGuard::begin(&self.state)?;
            let token = self.scope.child_token();
            *lock(&self.current) = Some(token.clone());
            let user_turn = conversation.push_user(text.clone());
            (pending, token, user_turn, conversation.history().to_vec())
        };
        let generator = lock(&self.generator).clone();

        let result = tokio::select! {
            _ = token.cancelled() => Err(GenerationError::cancelled()),
            result = generator.generate(&history, &text) => result,
        };

        let reply = {
            let mut conversation = lock(&self.conversation);
            if token.is_cancelled() {
                ReplyOutcome::Cancelled
            } else {
                match &result {
                    Ok(reply) => {
                        ReplyOutcome::Fulfilled(conversation.record_reply(&text, reply.clone()))
                    }
                    Err(error) if error.is_cancelled() => ReplyOutcome::Cancelled,
                    Err(error) => {
                        tracing::warn!("Generation rejected: {}", error);
                        ReplyOutcome::Rejected {
                            turn: conversation.record_rejection(error),
                            error: error.clone(),
                        }
                    }
                }
            }
        };

        *lock(&self.current) = None;
        let resolved = match reply {
            ReplyOutcome::Cancelled => GenerationState::Rejected(GenerationError::cancelled()),
            _ => GenerationState::resolve(result),
        };
        pending.finish(resolved);

        Ok(SendOutcome { user_turn, reply })
    }

    /// Cancels the in-flight generation, if any.
    pub fn cancel_pending(&self) {
        let _conversation = lock(&self.conversation);
        self.cancel_current();
    }

    /// Cancels any pending generation and restores the greeting.
    pub fn clear(&self) {
        let mut conversation = lock(&self.conversation);
        self.cancel_current();
        conversation.clear();
        tracing::debug!("Conversation cleared");
    }

    /// Closes the conversation. Pending and future sends are refused.
    pub fn close(&self) {
        self.scope.cancel();
    }

    /// Callers hold the conversation lock.
    fn cancel_current(&self) {
        if let Some(token) = lock(&self.current).as_ref() {
            tracing::info!("Cancelling pending generation");
            token.cancel();
        }
    }
}

impl Drop for ChatAssistant {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

fn generator_for(
    settings: &AssistantSettings,
    credential: Option<Credential>,
) -> Arc<dyn ResponseGenerator> {
    match credential {
        Some(credential) => Arc::new(OpenAIChatClient::new(credential, settings)),
        None => Arc::new(CannedResponder::from_millis(settings.offline_latency_ms)),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the `Pending` state for one generation.
///
/// Resets to `Rejected(Cancelled)` if dropped without [`finish`](Self::finish).
struct PendingGuard<'a> {
    state: &'a Mutex<GenerationState>,
    done: bool,
}

impl<'a> PendingGuard<'a> {
    fn begin(state: &'a Mutex<GenerationState>) -> Result<Self, SendError> {
        let mut current = lock(state);
        if current.is_pending() {
            return Err(SendError::Busy);
        }
        *current = GenerationState::Pending;
        Ok(Self { state, done: false })
    }

    fn finish(mut self, resolved: GenerationState) {
        *lock(self.state) = resolved;
        self.done = true;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            *lock(self.state) = GenerationState::Rejected(GenerationError::cancelled());
        }
    }
}
