//! Application configuration (`config.toml`).

use crate::error::{MindTrackError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_OFFLINE_LATENCY_MS: u64 = 1500;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.assistant.validate()
    }
}

/// Settings for both response generators.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AssistantSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Simulated latency of canned replies.
    #[serde(default = "default_offline_latency_ms")]
    pub offline_latency_ms: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            offline_latency_ms: DEFAULT_OFFLINE_LATENCY_MS,
        }
    }
}

impl AssistantSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(MindTrackError::config(format!(
                "assistant.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.model.trim().is_empty() {
            return Err(MindTrackError::config("assistant.model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(MindTrackError::config(
                "assistant.temperature must be between 0.0 and 2.0",
            ));
        }
        if self.max_tokens == 0 {
            return Err(MindTrackError::config("assistant.max_tokens must be positive"));
        }
        Ok(())
    }
}

/// Where saved transcripts go.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ExportSettings {
    /// Defaults to the current directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_offline_latency_ms() -> u64 {
    DEFAULT_OFFLINE_LATENCY_MS
}
