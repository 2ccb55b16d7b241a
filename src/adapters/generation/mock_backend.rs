//! Mock Generation Backend for testing.
//!
//! Returns pre-configured raw generations in order, records every prompt it
//! receives, and can inject errors or latency.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockGenerationBackend::new()
//!     .with_response("Counselor: 천천히 숨을 쉬어 보세요.")
//!     .with_error(MockGenerationError::Unavailable);
//!
//! let first = backend.complete("prompt").await?;
//! assert_eq!(backend.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{BackendInfo, GenerationBackend, GenerationError};

/// Raw text returned once the configured queue is exhausted.
pub const DEFAULT_MOCK_GENERATION: &str = "Counselor: 지금 어떤 느낌이 드세요?";

/// Mock generation backend for testing.
#[derive(Debug, Clone)]
pub struct MockGenerationBackend {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<String, MockGenerationError>>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Prompts received, in order.
    prompts: Arc<Mutex<Vec<String>>>,
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockGenerationError {
    Unavailable,
    Network,
    Timeout,
    ModelLoad,
}

impl From<MockGenerationError> for GenerationError {
    fn from(err: MockGenerationError) -> Self {
        match err {
            MockGenerationError::Unavailable => GenerationError::unavailable("mock backend unavailable"),
            MockGenerationError::Network => GenerationError::network("mock connection reset"),
            MockGenerationError::Timeout => GenerationError::Timeout { timeout_secs: 120 },
            MockGenerationError::ModelLoad => GenerationError::model_load("mock model missing"),
        }
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a raw generation to the queue.
    pub fn with_response(self, raw: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(raw.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: MockGenerationError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this backend.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Returns every prompt received.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<String, MockGenerationError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_GENERATION.to_string()))
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response().map_err(Into::into)
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("mock", "mock-counselor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_responses_in_order_then_default() {
        let backend = MockGenerationBackend::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(backend.complete("a").await.unwrap(), "First");
        assert_eq!(backend.complete("b").await.unwrap(), "Second");
        assert_eq!(backend.complete("c").await.unwrap(), DEFAULT_MOCK_GENERATION);
    }

    #[tokio::test]
    async fn injects_errors() {
        let backend = MockGenerationBackend::new().with_error(MockGenerationError::Timeout);
        let err = backend.complete("a").await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout { .. }));
    }

    #[tokio::test]
    async fn records_prompts_across_clones() {
        let backend = MockGenerationBackend::new();
        let shared = backend.clone();

        backend.complete("first prompt").await.unwrap();
        shared.complete("second prompt").await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(shared.prompts(), vec!["first prompt", "second prompt"]);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied() {
        let backend = MockGenerationBackend::new().with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        backend.complete("a").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
