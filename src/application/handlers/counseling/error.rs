//! Errors raised while handling counseling commands.

use thiserror::Error;

use crate::application::readiness::NotReady;
use crate::domain::counseling::SessionError;
use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};
use crate::ports::{DialogueLogError, GenerationError, SessionStoreError};

/// Failure of an init or chat command.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Session '{0}' not found; start a new session")]
    SessionNotFound(SessionId),

    #[error("Counselor is not ready: {0}")]
    NotReady(#[from] NotReady),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Failed to persist dialogue: {0}")]
    Persistence(#[from] DialogueLogError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::Validation(_) => ErrorCode::ValidationFailed,
            ChatError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            ChatError::NotReady(_) => ErrorCode::NotReady,
            ChatError::Generation(_) => ErrorCode::GenerationFailed,
            ChatError::Persistence(_) => ErrorCode::PersistenceFailed,
            ChatError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<SessionStoreError> for ChatError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => ChatError::SessionNotFound(id),
            SessionStoreError::AlreadyExists(id) => {
                ChatError::Internal(format!("session id collision: {}", id))
            }
        }
    }
}

impl From<SessionError> for ChatError {
    fn from(err: SessionError) -> Self {
        match err {
            // A terminated session is gone as far as the client is concerned.
            SessionError::Terminated(id) => ChatError::SessionNotFound(id),
            SessionError::Validation(e) => ChatError::Validation(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_session_not_found() {
        let id = SessionId::generate();
        let err: ChatError = SessionStoreError::NotFound(id.clone()).into();
        assert!(matches!(err, ChatError::SessionNotFound(ref found) if *found == id));
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[test]
    fn terminated_session_is_reported_as_not_found() {
        let err: ChatError = SessionError::Terminated(SessionId::generate()).into();
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[test]
    fn generation_failure_keeps_its_code() {
        let err: ChatError = GenerationError::unavailable("down").into();
        assert_eq!(err.code(), ErrorCode::GenerationFailed);
        assert_eq!(ChatError::from(NotReady::Loading).code(), ErrorCode::NotReady);
    }
}
