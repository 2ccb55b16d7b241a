//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationBackend` - Raw text completion (hosted or local model)
//! - `SafetyReviewer` - Secondary review of a candidate utterance
//! - `SessionStore` - Live, expiring session map with per-session leases
//! - `DialogueLog` - Durable per-session transcripts

mod dialogue_log;
mod generation_backend;
mod safety_reviewer;
mod session_store;

pub use dialogue_log::{DialogueLog, DialogueLogError};
pub use generation_backend::{BackendInfo, GenerationBackend, GenerationError};
pub use safety_reviewer::SafetyReviewer;
pub use session_store::{SessionLease, SessionStore, SessionStoreError};
