//! HTTP routes for counseling endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, default_message, init_session, status, CounselingHandlers};

/// Creates the counseling router with all endpoints.
pub fn counseling_routes(handlers: CounselingHandlers) -> Router {
    Router::new()
        .route("/init-session", post(init_session))
        .route("/chat", post(chat))
        .route("/status", get(status))
        .route("/default-message", get(default_message))
        .with_state(handlers)
}
