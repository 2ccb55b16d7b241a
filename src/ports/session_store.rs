//! Session Store Port - Live, time-bounded map of active sessions.
//!
//! Callers take a [`SessionLease`] for the whole of a turn. The lease is an
//! exclusive per-session lock, so two requests for the same session run one
//! after the other while requests for different sessions proceed in
//! parallel.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::counseling::Session;
use crate::domain::foundation::SessionId;

/// Exclusive access to one live session.
pub type SessionLease = OwnedMutexGuard<Session>;

/// Errors that can occur during session store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),
}

/// Port for the live session map.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Adds a new session, displacing the least recently used one when the
    /// store is full.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a session with the same id is live.
    async fn insert(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Takes exclusive access to a live session and marks it as used.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown, evicted, expired or terminated
    /// sessions.
    async fn lease(&self, id: &SessionId) -> Result<SessionLease, SessionStoreError>;

    /// Removes a session from the live map. Returns `true` if it was present.
    ///
    /// Safe to call while holding the session's lease.
    async fn evict(&self, id: &SessionId) -> bool;

    /// Removes every session idle past its time-to-live and returns them
    /// locked, so the caller can apply an expiry policy.
    async fn drain_expired(&self) -> Vec<SessionLease>;

    /// Number of sessions currently held, expired ones included until drained.
    async fn len(&self) -> usize;

    /// Returns `true` if a live (unexpired) session exists for `id`.
    async fn contains(&self, id: &SessionId) -> bool;
}
