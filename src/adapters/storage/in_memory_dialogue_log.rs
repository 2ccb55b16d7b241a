//! In-Memory Dialogue Log Adapter
//!
//! Keeps transcripts in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::counseling::History;
use crate::domain::foundation::SessionId;
use crate::ports::{DialogueLog, DialogueLogError};

/// In-memory storage for session transcripts
#[derive(Debug, Clone, Default)]
pub struct InMemoryDialogueLog {
    logs: Arc<RwLock<HashMap<SessionId, History>>>,
    saves: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl InMemoryDialogueLog {
    /// Create a new in-memory dialogue log
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following save fail with an IO error (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of sessions with a stored transcript
    pub async fn log_count(&self) -> usize {
        self.logs.read().await.len()
    }
}

#[async_trait]
impl DialogueLog for InMemoryDialogueLog {
    async fn save(&self, session_id: &SessionId, history: &History) -> Result<(), DialogueLogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DialogueLogError::IoError("disk unavailable".to_string()));
        }

        self.logs.write().await.insert(session_id.clone(), history.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self, session_id: &SessionId) -> Result<History, DialogueLogError> {
        self.logs
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| DialogueLogError::NotFound(session_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::counseling::Turn;

    #[tokio::test]
    async fn test_memory_log_save_and_load() {
        let log = InMemoryDialogueLog::new();
        let session_id = SessionId::generate();
        let history: History = vec![Turn::counselor("안녕하세요"), Turn::client("네")].into();

        log.save(&session_id, &history).await.unwrap();

        assert_eq!(log.load(&session_id).await.unwrap(), history);
        assert_eq!(log.save_count(), 1);
        assert_eq!(log.log_count().await, 1);
    }

    #[tokio::test]
    async fn test_memory_log_load_nonexistent() {
        let log = InMemoryDialogueLog::new();
        let result = log.load(&SessionId::generate()).await;
        assert!(matches!(result, Err(DialogueLogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_memory_log_failure_injection() {
        let log = InMemoryDialogueLog::new();
        let session_id = SessionId::generate();

        log.set_failing(true);
        assert!(log.save(&session_id, &History::new()).await.is_err());
        assert!(matches!(log.load(&session_id).await, Err(DialogueLogError::NotFound(_))));

        log.set_failing(false);
        assert!(log.save(&session_id, &History::new()).await.is_ok());
        assert_eq!(log.save_count(), 1);
    }
}
