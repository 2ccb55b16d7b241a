//! HTTP handlers for counseling endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    ChatError, ChatTurnCommand, ChatTurnHandler, CounselorTurnGenerator, InitSessionHandler,
    ReadinessGate, ReadinessState,
};

use super::dto::{
    ChatRequest, DefaultMessageResponse, ErrorResponse, StatusResponse, UtteranceResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CounselingHandlers {
    init_handler: Arc<InitSessionHandler>,
    chat_handler: Arc<ChatTurnHandler>,
    generator: ReadinessGate<CounselorTurnGenerator>,
    default_message: Arc<str>,
}

impl CounselingHandlers {
    pub fn new(
        init_handler: Arc<InitSessionHandler>,
        chat_handler: Arc<ChatTurnHandler>,
        generator: ReadinessGate<CounselorTurnGenerator>,
        default_message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            init_handler,
            chat_handler,
            generator,
            default_message: default_message.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /init-session - Open a session and return the opening line
pub async fn init_session(State(handlers): State<CounselingHandlers>) -> Response {
    match handlers.init_handler.handle().await {
        Ok(result) => (StatusCode::OK, Json(UtteranceResponse::from(result))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// POST /chat - Deliver one client message and return the counselor's reply
pub async fn chat(
    State(handlers): State<CounselingHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let cmd = ChatTurnCommand {
        session_id: req.session_id,
        user_utterance: req.user_utterance,
    };

    match handlers.chat_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(UtteranceResponse::from(result))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /status - Backend readiness
pub async fn status(State(handlers): State<CounselingHandlers>) -> Response {
    let state = handlers.generator.state();
    let backend = handlers.generator.get().ok().map(|g| g.backend_info());

    let response = StatusResponse {
        ready: state == ReadinessState::Ready,
        state,
        backend,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /default-message - Sample client message
pub async fn default_message(State(handlers): State<CounselingHandlers>) -> Response {
    let response = DefaultMessageResponse {
        message: handlers.default_message.to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_chat_error(error: ChatError) -> Response {
    let status = match &error {
        ChatError::Validation(_) => StatusCode::BAD_REQUEST,
        ChatError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ChatError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        ChatError::Generation(_) => StatusCode::BAD_GATEWAY,
        ChatError::Persistence(_) | ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "Chat request failed");
    }

    (status, Json(ErrorResponse::from(&error))).into_response()
}
