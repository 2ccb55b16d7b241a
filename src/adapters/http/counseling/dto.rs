//! HTTP DTOs for counseling endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{ChatError, ChatTurnResult, InitSessionResult, ReadinessState};
use crate::ports::BackendInfo;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One client message within a session.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub user_utterance: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Counselor utterance, plus the session id when a session was just opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UtteranceResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
    pub system_utterance: String,
    pub end_signal: bool,
}

impl From<InitSessionResult> for UtteranceResponse {
    fn from(result: InitSessionResult) -> Self {
        Self {
            session_id: Some(result.session_id.to_string()),
            system_utterance: result.system_utterance,
            end_signal: false,
        }
    }
}

impl From<ChatTurnResult> for UtteranceResponse {
    fn from(result: ChatTurnResult) -> Self {
        Self {
            session_id: None,
            system_utterance: result.system_utterance,
            end_signal: result.end_signal,
        }
    }
}

/// Readiness of the counselor backend.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub ready: bool,
    pub state: ReadinessState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendInfo>,
}

/// Sample client message for the front end's input box.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultMessageResponse {
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&ChatError> for ErrorResponse {
    fn from(error: &ChatError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}
