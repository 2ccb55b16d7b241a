//! In-Memory Session Store Adapter
//!
//! Live sessions keyed by id, each behind its own async mutex. Entries expire
//! after a period without a lease and the store holds at most `capacity`
//! sessions, displacing the least recently used one when full.
//!
//! The map lock is never held while waiting on a session lock, so a turn in
//! progress never blocks inserts or leases for other sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::domain::counseling::Session;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionLease, SessionStore, SessionStoreError};

struct Slot {
    session: Arc<Mutex<Session>>,
    touched: Instant,
}

/// In-memory, time-bounded session store
#[derive(Clone)]
pub struct InMemorySessionStore {
    slots: Arc<RwLock<HashMap<SessionId, Slot>>>,
    ttl: Duration,
    capacity: usize,
}

impl InMemorySessionStore {
    /// Create a store whose sessions expire after `ttl` idle and which holds
    /// at most `capacity` sessions
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn is_expired(&self, slot: &Slot, now: Instant) -> bool {
        now.duration_since(slot.touched) >= self.ttl
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<(), SessionStoreError> {
        let id = session.id().clone();
        let mut slots = self.slots.write().await;

        if slots.contains_key(&id) {
            return Err(SessionStoreError::AlreadyExists(id));
        }

        if slots.len() >= self.capacity {
            let oldest = slots
                .iter()
                .min_by_key(|(_, slot)| slot.touched)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                slots.remove(&oldest);
                tracing::warn!(session_id = %oldest, "Session store full; displaced least recently used session");
            }
        }

        slots.insert(
            id,
            Slot {
                session: Arc::new(Mutex::new(session)),
                touched: Instant::now(),
            },
        );
        Ok(())
    }

    async fn lease(&self, id: &SessionId) -> Result<SessionLease, SessionStoreError> {
        let handle = {
            let mut slots = self.slots.write().await;
            let now = Instant::now();
            match slots.get_mut(id) {
                Some(slot) if !self.is_expired(slot, now) => {
                    slot.touched = now;
                    Arc::clone(&slot.session)
                }
                _ => return Err(SessionStoreError::NotFound(id.clone())),
            }
        };

        let lease = handle.clone().lock_owned().await;

        // The session may have ended or left the map while we waited.
        let still_live = self
            .slots
            .read()
            .await
            .get(id)
            .is_some_and(|slot| Arc::ptr_eq(&slot.session, &handle));
        if !still_live || lease.is_terminated() {
            return Err(SessionStoreError::NotFound(id.clone()));
        }

        Ok(lease)
    }

    async fn evict(&self, id: &SessionId) -> bool {
        self.slots.write().await.remove(id).is_some()
    }

    async fn drain_expired(&self) -> Vec<SessionLease> {
        let expired: Vec<Arc<Mutex<Session>>> = {
            let mut slots = self.slots.write().await;
            let now = Instant::now();
            let ids: Vec<SessionId> = slots
                .iter()
                .filter(|(_, slot)| self.is_expired(slot, now))
                .map(|(id, _)| id.clone())
                .collect();
            ids.iter()
                .filter_map(|id| slots.remove(id))
                .map(|slot| slot.session)
                .collect()
        };

        let mut leases = Vec::with_capacity(expired.len());
        for handle in expired {
            let lease = handle.lock_owned().await;
            if !lease.is_terminated() {
                leases.push(lease);
            }
        }
        leases
    }

    async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    async fn contains(&self, id: &SessionId) -> bool {
        let now = Instant::now();
        self.slots
            .read()
            .await
            .get(id)
            .is_some_and(|slot| !self.is_expired(slot, now))
    }
}
