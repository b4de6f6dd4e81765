//! OpenAIChatClient - Chat Completions client used in online mode.
//!
//! Sends the system prompt, the committed history and the new user entry in
//! one request. No retries: every failure becomes a [`GenerationError`].

use crate::prompts::SYSTEM_PROMPT;
use async_trait::async_trait;
use mindtrack_core::chat::{GenerationError, GenerationMode, HistoryEntry, ResponseGenerator};
use mindtrack_core::config::AssistantSettings;
use mindtrack_core::secret::Credential;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Detail used when the endpoint reports an error without a message.
pub const ENDPOINT_ERROR_DETAIL: &str = "Error generating response. Please try again.";
/// Detail used when no usable response came back.
pub const CONNECTION_ERROR_DETAIL: &str =
    "An error occurred while connecting to the AI service. Please try again.";

/// Generator that talks to an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAIChatClient {
    client: Client,
    credential: Credential,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIChatClient {
    pub fn new(credential: Credential, settings: &AssistantSettings) -> Self {
        Self {
            client: Client::new(),
            credential,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request<'a>(
        &'a self,
        history: &'a [HistoryEntry],
        input: &'a str,
    ) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT,
        });
        messages.extend(history.iter().map(|entry| ChatMessage {
            role: entry.role.as_str(),
            content: &entry.content,
        }));
        messages.push(ChatMessage {
            role: "user",
            content: input,
        });

        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    async fn send_request(
        &self,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.credential.expose())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!("Chat completion request failed: {}", err);
                GenerationError::network(CONNECTION_ERROR_DETAIL)
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|err| {
            tracing::warn!("Failed to read chat completion body: {}", err);
            GenerationError::network(CONNECTION_ERROR_DETAIL)
        })?;

        interpret_response(status, &body_text)
    }
}

#[async_trait]
impl ResponseGenerator for OpenAIChatClient {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Online
    }

    async fn generate(
        &self,
        history: &[HistoryEntry],
        input: &str,
    ) -> Result<String, GenerationError> {
        let request = self.build_request(history, input);
        tracing::debug!(
            "Requesting completion: model={} history_len={}",
            self.model,
            history.len()
        );
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[allow(dead_code)]
    r#type: Option<String>,
}

/// Classifies a finished HTTP exchange.
///
/// A body that is not JSON is a parse failure whatever the status. An
/// `error` object wins over the status code, so a 200 carrying an error
/// payload is still rejected.
fn interpret_response(status: StatusCode, body: &str) -> Result<String, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|err| {
        tracing::warn!(
            "Chat completion endpoint returned {} with a non-JSON body: {}",
            status,
            err
        );
        GenerationError::parse(CONNECTION_ERROR_DETAIL)
    })?;

    if let Ok(wrapper) = ErrorResponse::deserialize(&value) {
        let message = wrapper
            .error
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| ENDPOINT_ERROR_DETAIL.to_string());
        return Err(map_http_error(status, message));
    }

    if !status.is_success() {
        tracing::warn!("Chat completion endpoint returned {}", status);
        return Err(map_http_error(status, ENDPOINT_ERROR_DETAIL.to_string()));
    }

    let parsed = ChatCompletionResponse::deserialize(value).map_err(|err| {
        tracing::warn!("Failed to parse chat completion response: {}", err);
        GenerationError::parse(CONNECTION_ERROR_DETAIL)
    })?;

    extract_text_response(parsed)
}

fn map_http_error(status: StatusCode, message: String) -> GenerationError {
    if status == StatusCode::UNAUTHORIZED {
        GenerationError::unauthorized(message)
    } else {
        GenerationError::endpoint(message)
    }
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            tracing::warn!("Chat completion response had no content");
            GenerationError::parse(CONNECTION_ERROR_DETAIL)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindtrack_core::chat::GenerationErrorKind;

    #[test]
    fn test_request_shape() {
        let client = OpenAIChatClient::new(
            Credential::parse("sk-test").unwrap(),
            &AssistantSettings::default(),
        );
        let history = vec![HistoryEntry::user("hi"), HistoryEntry::assistant("hello")];
        let request = client.build_request(&history, "I'm tired");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 150);
        let messages = json["messages"].as_array().unwrap();
        let roles: Vec<&str> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, ["system", "user", "assistant", "user"]);
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[3]["content"], "I'm tired");
    }

    #[test]
    fn test_success_returns_content_verbatim() {
        let body =
            r#"{"choices":[{"message":{"role":"assistant","content":"  Take a break.\n"}}]}"#;
        assert_eq!(interpret_response(StatusCode::OK, body).unwrap(), "  Take a break.\n");
    }

    #[test]
    fn test_error_payload_on_success_status() {
        let body = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        let err = interpret_response(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Endpoint);
        assert_eq!(err.detail, "model overloaded");
    }

    #[test]
    fn test_unauthorized() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        let err = interpret_response(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(err.is_credential_problem());
        assert_eq!(err.detail, "Incorrect API key provided");
    }

    #[test]
    fn test_error_without_message_uses_default() {
        let err = interpret_response(StatusCode::BAD_REQUEST, r#"{"error":{}}"#).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Endpoint);
        assert_eq!(err.detail, ENDPOINT_ERROR_DETAIL);

        let err = interpret_response(StatusCode::SERVICE_UNAVAILABLE, "{}").unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Endpoint);
        assert_eq!(err.detail, ENDPOINT_ERROR_DETAIL);
    }

    #[test]
    fn test_non_json_error_page_is_connection_failure() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Parse);
        assert_eq!(err.detail, CONNECTION_ERROR_DETAIL);
    }

    #[test]
    fn test_unparseable_or_empty_success() {
        let err = interpret_response(StatusCode::OK, "not json").unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Parse);

        let err = interpret_response(StatusCode::OK, r#"{"choices":[]}"#).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Parse);
    }
}
