//! Local Model Provider - GenerationBackend over a model served on this host.
//!
//! Talks to an Ollama-compatible runtime. The model is loaded once when the
//! provider is built ([`LocalModelProvider::load`]) and pinned in memory;
//! generations then run greedily in raw mode so the runtime applies no chat
//! template of its own.
//!
//! The runtime holds one model instance, so generations are serialized.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::config::Device;
use crate::ports::{BackendInfo, GenerationBackend, GenerationError};

/// Special and control tokens that can leak into decoded text.
static SPECIAL_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\|[^|>]*\|>|</?s>|\[/?INST\]").expect("valid special token pattern")
});

/// Keep the model resident for the lifetime of the process.
const KEEP_LOADED: i64 = -1;

/// Layer count large enough to offload every layer to the GPU.
const ALL_LAYERS: u32 = 999;

/// Configuration for the local model provider.
#[derive(Debug, Clone)]
pub struct LocalModelConfig {
    /// Base URL of the runtime (e.g., "http://127.0.0.1:11434").
    pub runtime_url: String,
    /// Model name as known to the runtime.
    pub model: String,
    /// Compute device preference.
    pub device: Device,
    /// Maximum new tokens per generation.
    pub max_new_tokens: u32,
    /// Request timeout (model loading included).
    pub timeout: Duration,
}

impl LocalModelConfig {
    pub fn new(runtime_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            runtime_url: runtime_url.into(),
            model: model.into(),
            device: Device::Auto,
            max_new_tokens: 128,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GPU layer count for the runtime; `None` lets it pick.
    fn gpu_layers(&self) -> Option<u32> {
        match self.device {
            Device::Auto => None,
            Device::Cpu => Some(0),
            Device::Gpu => Some(ALL_LAYERS),
        }
    }
}

/// Locally served model backend.
pub struct LocalModelProvider {
    config: LocalModelConfig,
    client: Client,
    gate: Mutex<()>,
}

impl LocalModelProvider {
    /// Loads the model into the runtime and returns a ready provider.
    ///
    /// This is slow (the runtime reads the weights) and should run off the
    /// request path.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoad` if the runtime is unreachable or cannot load the
    /// model.
    pub async fn load(config: LocalModelConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::model_load(format!("Failed to create HTTP client: {}", e)))?;

        let provider = Self {
            config,
            client,
            gate: Mutex::new(()),
        };

        tracing::info!(
            model = %provider.config.model,
            device = ?provider.config.device,
            "Loading local model"
        );
        provider.warm_up().await?;
        tracing::info!(model = %provider.config.model, "Local model loaded");

        Ok(provider)
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.runtime_url.trim_end_matches('/'))
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            num_predict: self.config.max_new_tokens,
            temperature: 0.0,
            num_gpu: self.config.gpu_layers(),
        }
    }

    /// A prompt-less generate call makes the runtime load and pin the model.
    async fn warm_up(&self) -> Result<(), GenerationError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: None,
            raw: false,
            stream: false,
            keep_alive: KEEP_LOADED,
            options: self.options(),
        };

        let response = self
            .post(&request)
            .await
            .map_err(|e| GenerationError::model_load(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::model_load(format!("{}: {}", status, body)));
        }
        Ok(())
    }

    async fn post(&self, request: &GenerateRequest<'_>) -> Result<Response, GenerationError> {
        self.client
            .post(self.generate_url())
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(e, self.config.timeout.as_secs()))
    }
}

/// Strips special/control tokens from decoded model output.
pub fn strip_special_tokens(text: &str) -> String {
    SPECIAL_TOKENS.replace_all(text, "").into_owned()
}

#[async_trait]
impl GenerationBackend for LocalModelProvider {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: Some(prompt),
            raw: true,
            stream: false,
            keep_alive: KEEP_LOADED,
            options: self.options(),
        };

        let _turn = self.gate.lock().await;
        tracing::debug!(model = %self.config.model, "Running local generation");

        let response = self.post(&request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, &body));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(strip_special_tokens(&generated.response))
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("local", &self.config.model)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
    raw: bool,
    stream: bool,
    keep_alive: i64,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_gpu: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}
