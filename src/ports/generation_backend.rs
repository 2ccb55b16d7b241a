//! Generation Backend Port - Interface for raw text completion.
//!
//! The counselor turn generator only needs one thing from a language model:
//! turn a prompt into raw continuation text. Hosted completion services and
//! locally served models both sit behind this port.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoBackend;
//!
//! #[async_trait]
//! impl GenerationBackend for EchoBackend {
//!     async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
//!         Ok(format!("Counselor: {}", prompt))
//!     }
//!
//!     fn backend_info(&self) -> BackendInfo {
//!         BackendInfo::new("echo", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for raw text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generates raw continuation text for `prompt`.
    ///
    /// The returned text is unprocessed model output; callers are expected to
    /// validate and clean it.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Describes the backend (kind and model).
    fn backend_info(&self) -> BackendInfo;
}

/// Backend description, reported by the status endpoint and in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend kind (e.g., "hosted", "local").
    pub kind: String,
    /// Model identifier.
    pub model: String,
}

impl BackendInfo {
    pub fn new(kind: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            model: model.into(),
        }
    }
}

/// Generation backend errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Backend is unreachable or returned a server error.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Backend rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Local model could not be loaded.
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a model load error.
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad(message.into())
    }

    /// Maps a transport error, keeping timeouts distinct.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Maps a non-success HTTP status to an error.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthenticationFailed,
            400 | 404 | 422 => Self::InvalidRequest(format!("{}: {}", status, body)),
            _ => Self::unavailable(format!("{}: {}", status, body)),
        }
    }
}
