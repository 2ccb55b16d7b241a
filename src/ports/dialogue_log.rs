//! Dialogue Log Port - Durable per-session transcripts.
//!
//! Each save replaces the whole transcript for a session, so a stored log
//! always matches the history as of the last completed turn.

use async_trait::async_trait;

use crate::domain::counseling::History;
use crate::domain::foundation::SessionId;

/// Errors that can occur during dialogue log operations
#[derive(Debug, thiserror::Error)]
pub enum DialogueLogError {
    #[error("Dialogue log not found for session: {0}")]
    NotFound(SessionId),

    #[error("Failed to serialize dialogue: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize dialogue: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting session transcripts
#[async_trait]
pub trait DialogueLog: Send + Sync {
    /// Replace the stored transcript for a session
    ///
    /// # Errors
    /// Returns `DialogueLogError` if the write fails; the previous transcript
    /// is left intact in that case
    async fn save(&self, session_id: &SessionId, history: &History) -> Result<(), DialogueLogError>;

    /// Load the stored transcript for a session
    ///
    /// # Errors
    /// Returns `DialogueLogError::NotFound` if nothing was stored
    async fn load(&self, session_id: &SessionId) -> Result<History, DialogueLogError>;
}
