//! Generation backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::counseling::DEFAULT_HISTORY_WINDOW;

/// Generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Use the hosted completion endpoint instead of the local model
    #[serde(default = "default_use_hosted")]
    pub use_hosted_backend: bool,

    /// Model identifier passed to the backend
    #[serde(default)]
    pub model_identifier: String,

    /// Base URL of the hosted OpenAI-style completion service (e.g. `http://host:8000/v1`)
    pub endpoint_url: Option<String>,

    /// Sampling temperature for the hosted backend
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum generated tokens per turn
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Backend request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Base URL of the local inference runtime
    #[serde(default = "default_local_runtime_url")]
    pub local_runtime_url: String,

    /// Compute device for the local model
    #[serde(default)]
    pub device: Device,

    /// Number of recent turns included in the prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

/// Compute device for the local model
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Let the runtime pick the best available device
    #[default]
    Auto,
    Gpu,
    Cpu,
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_identifier.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GENERATION__MODEL_IDENTIFIER"));
        }

        if self.use_hosted_backend {
            match self.endpoint_url.as_deref() {
                None | Some("") => {
                    return Err(ValidationError::MissingRequired("GENERATION__ENDPOINT_URL"));
                }
                Some(url) if !is_http_url(url) => {
                    return Err(ValidationError::InvalidUrl("generation.endpoint_url"));
                }
                Some(_) => {}
            }
        } else if !is_http_url(&self.local_runtime_url) {
            return Err(ValidationError::InvalidUrl("generation.local_runtime_url"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::MustBePositive("generation.max_tokens"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout("generation"));
        }
        if self.history_window == 0 {
            return Err(ValidationError::MustBePositive("generation.history_window"));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            use_hosted_backend: default_use_hosted(),
            model_identifier: String::new(),
            endpoint_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            local_runtime_url: default_local_runtime_url(),
            device: Device::default(),
            history_window: default_history_window(),
        }
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_use_hosted() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    128
}

fn default_timeout() -> u64 {
    120
}

fn default_local_runtime_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}
