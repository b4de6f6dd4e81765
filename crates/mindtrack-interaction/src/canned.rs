//! Offline generator that answers from the keyword reply rules.

use async_trait::async_trait;
use mindtrack_core::chat::{
    GenerationError, GenerationMode, HistoryEntry, ResponseGenerator, select_canned_reply,
};
use std::time::Duration;

/// Picks a canned reply after a simulated "thinking" delay.
///
/// History is ignored; only the newest input is matched.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    latency: Duration,
}

impl CannedResponder {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_millis(latency_ms: u64) -> Self {
        Self::new(Duration::from_millis(latency_ms))
    }
}

#[async_trait]
impl ResponseGenerator for CannedResponder {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Offline
    }

    async fn generate(
        &self,
        _history: &[HistoryEntry],
        input: &str,
    ) -> Result<String, GenerationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(select_canned_reply(input).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindtrack_core::chat::reply::{FALLBACK_REPLY, STRESS_REPLY};

    #[tokio::test]
    async fn test_replies_by_keyword() {
        let responder = CannedResponder::from_millis(0);
        assert_eq!(responder.mode(), GenerationMode::Offline);

        let reply = responder.generate(&[], "So STRESSED about finals").await.unwrap();
        assert_eq!(reply, STRESS_REPLY);

        let reply = responder.generate(&[], "hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_latency() {
        let responder = CannedResponder::from_millis(1500);
        let started = tokio::time::Instant::now();

        responder.generate(&[], "tired").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
