//! Background expiry of idle sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::ExpiryPolicy;
use crate::ports::{DialogueLog, SessionStore};

/// Periodically removes idle sessions from the store.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    log: Arc<dyn DialogueLog>,
    policy: ExpiryPolicy,
    closing_line: String,
}

impl SessionSweeper {
    pub fn new(
        store: Arc<dyn SessionStore>,
        log: Arc<dyn DialogueLog>,
        policy: ExpiryPolicy,
        closing_line: impl Into<String>,
    ) -> Self {
        Self {
            store,
            log,
            policy,
            closing_line: closing_line.into(),
        }
    }

    /// Runs one sweep and returns how many sessions expired.
    ///
    /// Under [`ExpiryPolicy::Farewell`] each expired session gets the closing
    /// line appended and its log rewritten. A failed write is logged and the
    /// session is dropped anyway.
    pub async fn sweep(&self) -> usize {
        let expired = self.store.drain_expired().await;
        let count = expired.len();

        for mut session in expired {
            match self.policy {
                ExpiryPolicy::Silent => {
                    tracing::info!(session_id = %session.id(), "Session expired");
                }
                ExpiryPolicy::Farewell => {
                    if let Err(e) = session.expire_with_farewell(self.closing_line.as_str()) {
                        tracing::warn!(session_id = %session.id(), error = %e, "Could not close expired session");
                        continue;
                    }
                    if let Err(e) = self.log.save(session.id(), session.history()).await {
                        tracing::warn!(session_id = %session.id(), error = %e, "Failed to persist farewell");
                    } else {
                        tracing::info!(session_id = %session.id(), "Session expired with farewell");
                    }
                }
            }
        }

        count
    }

    /// Sweeps every `interval` until the task is aborted.
    pub fn spawn(self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let expired = self.sweep().await;
                if expired > 0 {
                    tracing::debug!(expired, "Expiry sweep finished");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryDialogueLog, InMemorySessionStore};
    use crate::domain::counseling::{Role, Session};
    use crate::domain::foundation::SessionId;

    const TTL: Duration = Duration::from_secs(60);
    const CLOSING: &str = "오늘 상담은 여기까지입니다.";

    async fn seeded_store() -> (InMemorySessionStore, SessionId) {
        let store = InMemorySessionStore::new(TTL, 10);
        let session = Session::create(SessionId::generate(), "안녕하세요").unwrap();
        let id = session.id().clone();
        store.insert(session).await.unwrap();
        (store, id)
    }

    #[tokio::test(start_paused = true)]
    async fn silent_policy_drops_without_writing() {
        let (store, id) = seeded_store().await;
        let log = InMemoryDialogueLog::new();
        let sweeper = SessionSweeper::new(
            Arc::new(store.clone()),
            Arc::new(log.clone()),
            ExpiryPolicy::Silent,
            CLOSING,
        );

        assert_eq!(sweeper.sweep().await, 0);
        tokio::time::advance(TTL + Duration::from_secs(1)).await;

        assert_eq!(sweeper.sweep().await, 1);
        assert!(!store.contains(&id).await);
        assert_eq!(log.save_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn farewell_policy_appends_closing_line() {
        let (store, id) = seeded_store().await;
        let log = InMemoryDialogueLog::new();
        let sweeper = SessionSweeper::new(
            Arc::new(store.clone()),
            Arc::new(log.clone()),
            ExpiryPolicy::Farewell,
            CLOSING,
        );

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert_eq!(sweeper.sweep().await, 1);

        let history = log.load(&id).await.unwrap();
        let last = history.last().unwrap();
        assert_eq!(last.role, Role::Counselor);
        assert_eq!(last.message, CLOSING);
        assert_eq!(history.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn farewell_write_failure_still_drops_session() {
        let (store, id) = seeded_store().await;
        let log = InMemoryDialogueLog::new();
        log.set_failing(true);
        let sweeper = SessionSweeper::new(
            Arc::new(store.clone()),
            Arc::new(log.clone()),
            ExpiryPolicy::Farewell,
            CLOSING,
        );

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert_eq!(sweeper.sweep().await, 1);
        assert!(!store.contains(&id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_sweeper_expires_idle_sessions() {
        let (store, id) = seeded_store().await;
        let sweeper = SessionSweeper::new(
            Arc::new(store.clone()),
            Arc::new(InMemoryDialogueLog::new()),
            ExpiryPolicy::Silent,
            CLOSING,
        );

        let handle = sweeper.spawn(Duration::from_secs(10));
        tokio::time::sleep(TTL + Duration::from_secs(15)).await;

        assert!(!store.contains(&id).await);
        assert_eq!(store.len().await, 0);
        handle.abort();
    }
}
