//! Gemini Reviewer - SafetyReviewer backed by Gemini `generateContent`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiReviewerConfig::new(api_key).with_model("gemini-pro");
//! let reviewer = GeminiReviewer::new(config)?;
//! ```
//!
//! Any failure (transport, timeout, non-2xx, unexpected body) is logged and
//! answered with the termination sentinel.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::counseling::{safety_review_prompt, History, TERMINATION_SENTINEL};
use crate::ports::SafetyReviewer;

/// Configuration for the Gemini reviewer.
#[derive(Debug, Clone)]
pub struct GeminiReviewerConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-pro").
    pub model: String,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiReviewerConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "gemini-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Why a review call produced no usable text.
#[derive(Debug, thiserror::Error)]
enum ReviewFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response carried no candidate text")]
    MissingText,
}

/// Safety reviewer calling Gemini.
pub struct GeminiReviewer {
    config: GeminiReviewerConfig,
    client: Client,
}

impl GeminiReviewer {
    /// Creates a new reviewer with the given configuration.
    pub fn new(config: GeminiReviewerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Endpoint URL without the key query parameter.
    fn endpoint_url(&self) -> String {
        format!(
            "{}/v1/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn request_review(&self, prompt: &str) -> Result<String, ReviewFailure> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("key", self.config.api_key.expose_secret().as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewFailure::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(ReviewFailure::MissingText)
    }
}

#[async_trait]
impl SafetyReviewer for GeminiReviewer {
    async fn review(&self, history: &History, candidate: &str) -> String {
        let prompt = safety_review_prompt(history, candidate);

        match self.request_review(&prompt).await {
            Ok(reviewed) => {
                tracing::debug!(original = %candidate, reviewed = %reviewed, "Safety review complete");
                reviewed
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.config.model, "Safety review failed; ending session");
                TERMINATION_SENTINEL.to_string()
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}
