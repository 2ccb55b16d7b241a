//! InitSessionHandler - Command handler for opening a counseling session.

use std::sync::Arc;

use super::ChatError;
use crate::domain::counseling::Session;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Result of opening a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSessionResult {
    pub session_id: SessionId,
    pub system_utterance: String,
}

/// Handler for opening sessions.
pub struct InitSessionHandler {
    store: Arc<dyn SessionStore>,
    opening_line: String,
}

impl InitSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, opening_line: impl Into<String>) -> Self {
        Self {
            store,
            opening_line: opening_line.into(),
        }
    }

    /// Allocates a session seeded with the opening line.
    ///
    /// Nothing is written to the dialogue log until the first turn completes.
    pub async fn handle(&self) -> Result<InitSessionResult, ChatError> {
        let session = Session::create(SessionId::generate(), self.opening_line.as_str())?;
        let session_id = session.id().clone();

        self.store.insert(session).await?;
        tracing::info!(session_id = %session_id, "Session opened");

        Ok(InitSessionResult {
            session_id,
            system_utterance: self.opening_line.clone(),
        })
    }
}
