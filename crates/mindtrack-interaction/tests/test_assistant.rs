use async_trait::async_trait;
use mindtrack_core::chat::reply::{POSITIVE_REPLY, STRESS_REPLY};
use mindtrack_core::chat::{
    APOLOGY_PREFIX, GREETING, GenerationError, GenerationMode, GenerationState, HistoryEntry,
    HistoryRole, ResponseGenerator, SendError, Sender, UserInput,
};
use mindtrack_core::config::AssistantSettings;
use mindtrack_core::secret::Credential;
use mindtrack_interaction::{ChatAssistant, ReplyOutcome};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn offline_settings() -> AssistantSettings {
    AssistantSettings {
        offline_latency_ms: 0,
        ..AssistantSettings::default()
    }
}

/// Replies with a fixed script and records the history it was given.
struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String, GenerationError>>>,
    seen: Mutex<Vec<Vec<HistoryEntry>>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ResponseGenerator for ScriptedGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Online
    }

    async fn generate(
        &self,
        history: &[HistoryEntry],
        _input: &str,
    ) -> Result<String, GenerationError> {
        self.seen.lock().unwrap().push(history.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok("default".to_string()))
    }
}

/// Blocks until released.
struct GatedGenerator {
    gate: Notify,
}

#[async_trait]
impl ResponseGenerator for GatedGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Online
    }

    async fn generate(
        &self,
        _history: &[HistoryEntry],
        input: &str,
    ) -> Result<String, GenerationError> {
        self.gate.notified().await;
        Ok(format!("echo: {input}"))
    }
}

async fn wait_until_pending(assistant: &ChatAssistant) {
    for _ in 0..200 {
        if assistant.is_pending() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("generation never became pending");
}

#[tokio::test]
async fn test_offline_reply_and_history() {
    let assistant = ChatAssistant::new(offline_settings(), None);
    assert_eq!(assistant.mode(), GenerationMode::Offline);
    assert!(assistant.shows_mood_chips());

    let outcome = assistant
        .send(UserInput::Chip("Stressed".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.user_turn.content, "Stressed");
    match outcome.reply {
        ReplyOutcome::Fulfilled(turn) => assert_eq!(turn.content, STRESS_REPLY),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let turns = assistant.turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].content, GREETING);
    assert!(!assistant.shows_mood_chips());

    let history = assistant.history();
    assert_eq!(
        history,
        vec![HistoryEntry::user("Stressed"), HistoryEntry::assistant(STRESS_REPLY)]
    );
    assert_eq!(assistant.state(), GenerationState::Fulfilled(STRESS_REPLY.to_string()));
}

#[tokio::test]
async fn test_empty_typed_input_refused() {
    let assistant = ChatAssistant::new(offline_settings(), None);

    let err = assistant
        .send(UserInput::Typed("   ".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err, SendError::EmptyInput);
    assert_eq!(assistant.turns().len(), 1);
    assert_eq!(assistant.state(), GenerationState::Idle);
}

#[tokio::test]
async fn test_rejection_keeps_history_alternating() {
    let generator = ScriptedGenerator::new(vec![
        Ok("first reply".to_string()),
        Err(GenerationError::endpoint("model overloaded")),
        Ok("third reply".to_string()),
    ]);
    let assistant = ChatAssistant::with_generator(offline_settings(), generator.clone());

    for text in ["one", "two", "three"] {
        assistant.send(UserInput::Typed(text.to_string())).await.unwrap();
    }

    let turns = assistant.turns();
    assert_eq!(turns.len(), 7);
    assert_eq!(turns[4].sender, Sender::Ai);
    assert_eq!(turns[4].content, format!("{APOLOGY_PREFIX}model overloaded"));

    let roles: Vec<HistoryRole> = assistant.history().iter().map(|e| e.role).collect();
    assert_eq!(
        roles,
        [HistoryRole::User, HistoryRole::Assistant, HistoryRole::User, HistoryRole::Assistant]
    );

    // the third request did not see the rejected exchange
    let seen = generator.seen.lock().unwrap();
    assert_eq!(seen[2], vec![HistoryEntry::user("one"), HistoryEntry::assistant("first reply")]);
}

#[tokio::test]
async fn test_second_send_while_pending_is_busy() {
    let generator = Arc::new(GatedGenerator { gate: Notify::new() });
    let assistant = Arc::new(ChatAssistant::with_generator(offline_settings(), generator.clone()));

    let first = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.send(UserInput::Typed("hello".to_string())).await })
    };
    wait_until_pending(&assistant).await;

    let err = assistant
        .send(UserInput::Chip("Happy".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err, SendError::Busy);

    generator.gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(outcome.reply, ReplyOutcome::Fulfilled(assistant.turns()[2].clone()));
    assert_eq!(assistant.turns().len(), 3);
}

#[tokio::test]
async fn test_cancel_pending_appends_no_reply() {
    let generator = Arc::new(GatedGenerator { gate: Notify::new() });
    let assistant = Arc::new(ChatAssistant::with_generator(offline_settings(), generator));

    let pending = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.send(UserInput::Typed("hello".to_string())).await })
    };
    wait_until_pending(&assistant).await;
    assistant.cancel_pending();

    let outcome = pending.await.unwrap().unwrap();
    assert_eq!(outcome.reply, ReplyOutcome::Cancelled);
    assert_eq!(assistant.turns().len(), 2);
    assert!(assistant.history().is_empty());
    assert!(matches!(assistant.state(), GenerationState::Rejected(e) if e.is_cancelled()));

    // the conversation stays usable
    assert!(!assistant.is_pending());
}

#[tokio::test]
async fn test_dropped_send_releases_pending_state() {
    let generator = Arc::new(GatedGenerator { gate: Notify::new() });
    let assistant = ChatAssistant::with_generator(offline_settings(), generator.clone());

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        assistant.send(UserInput::Typed("hello".to_string())),
    )
    .await;
    assert!(timed_out.is_err());

    assert!(!assistant.is_pending());
    assert!(matches!(assistant.state(), GenerationState::Rejected(e) if e.is_cancelled()));

    generator.gate.notify_one();
    let outcome = assistant
        .send(UserInput::Typed("again".to_string()))
        .await
        .unwrap();
    match outcome.reply {
        ReplyOutcome::Fulfilled(turn) => assert_eq!(turn.content, "echo: again"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        assistant.history(),
        vec![HistoryEntry::user("again"), HistoryEntry::assistant("echo: again")]
    );
}

#[tokio::test]
async fn test_clear_while_pending_cancels_reply() {
    let generator = Arc::new(GatedGenerator { gate: Notify::new() });
    let assistant = Arc::new(ChatAssistant::with_generator(offline_settings(), generator));

    let pending = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.send(UserInput::Typed("hello".to_string())).await })
    };
    wait_until_pending(&assistant).await;
    assistant.clear();

    let outcome = pending.await.unwrap().unwrap();
    assert_eq!(outcome.reply, ReplyOutcome::Cancelled);

    let turns = assistant.turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].content, GREETING);
    assert!(assistant.history().is_empty());
    assert!(!assistant.is_pending());
}

#[tokio::test]
async fn test_close_cancels_and_refuses() {
    let generator = Arc::new(GatedGenerator { gate: Notify::new() });
    let assistant = Arc::new(ChatAssistant::with_generator(offline_settings(), generator));

    let pending = {
        let assistant = assistant.clone();
        tokio::spawn(async move { assistant.send(UserInput::Typed("hello".to_string())).await })
    };
    wait_until_pending(&assistant).await;
    assistant.close();

    assert_eq!(pending.await.unwrap().unwrap().reply, ReplyOutcome::Cancelled);
    let err = assistant
        .send(UserInput::Typed("again".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err, SendError::Closed);
}

#[tokio::test]
async fn test_clear_restores_greeting() {
    let assistant = ChatAssistant::new(offline_settings(), None);
    assistant.send(UserInput::Typed("I'm happy".to_string())).await.unwrap();
    assert_eq!(assistant.turns()[2].content, POSITIVE_REPLY);

    assistant.clear();

    let turns = assistant.turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].content, GREETING);
    assert!(assistant.history().is_empty());
    assert!(assistant.shows_mood_chips());
}

#[tokio::test]
async fn test_online_unauthorized_needs_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let settings = AssistantSettings {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        ..offline_settings()
    };
    let assistant = ChatAssistant::new(settings, Some(Credential::parse("sk-bad").unwrap()));
    assert_eq!(assistant.mode(), GenerationMode::Online);

    let outcome = assistant
        .send(UserInput::Typed("hello".to_string()))
        .await
        .unwrap();

    assert!(outcome.needs_credential());
    assert!(assistant.history().is_empty());
    assert!(assistant.turns()[2].content.starts_with(APOLOGY_PREFIX));
}

#[tokio::test]
async fn test_set_credential_switches_mode() {
    let assistant = ChatAssistant::new(offline_settings(), None);
    assistant.set_credential(Some(Credential::parse("sk-test").unwrap()));
    assert_eq!(assistant.mode(), GenerationMode::Online);

    assistant.set_credential(None);
    assert_eq!(assistant.mode(), GenerationMode::Offline);
}
