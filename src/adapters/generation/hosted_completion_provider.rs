//! Hosted Completion Provider - GenerationBackend over an OpenAI-style
//! text-completion service (e.g. a vLLM server).
//!
//! # Configuration
//!
//! ```ignore
//! let config = HostedCompletionConfig::new("http://vllm:8000/v1", "counselor-7b")
//!     .with_temperature(0.3)
//!     .with_max_tokens(128);
//!
//! let provider = HostedCompletionProvider::new(config)?;
//! ```
//!
//! Requests go to `POST {base_url}/completions` and the first choice's `text`
//! is returned as-is. Failures are not retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{BackendInfo, GenerationBackend, GenerationError};

/// Configuration for the hosted completion provider.
#[derive(Debug, Clone)]
pub struct HostedCompletionConfig {
    /// Base URL of the completion API (e.g., "http://localhost:8000/v1").
    pub base_url: String,
    /// Model served by the endpoint.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl HostedCompletionConfig {
    /// Creates a configuration with the default decoding budget.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            temperature: 0.3,
            max_tokens: 128,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Hosted completion backend.
pub struct HostedCompletionProvider {
    config: HostedCompletionConfig,
    client: Client,
}

impl HostedCompletionProvider {
    /// Creates a provider; no request is made until the first completion.
    pub fn new(config: HostedCompletionConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn send_request(&self, prompt: &str) -> Result<Response, GenerationError> {
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        self.client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(e, self.config.timeout.as_secs()))
    }

    async fn parse_response(&self, response: Response) -> Result<String, GenerationError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, &body));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| GenerationError::parse("No choices in response"))
    }
}

#[async_trait]
impl GenerationBackend for HostedCompletionProvider {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(model = %self.config.model, "Requesting hosted completion");
        let response = self.send_request(prompt).await?;
        self.parse_response(response).await
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("hosted", &self.config.model)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}
