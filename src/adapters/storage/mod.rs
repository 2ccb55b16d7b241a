//! Storage Adapters
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Live sessions with idle expiry and a capacity bound
//! - **FileDialogueLog** - Session transcripts as JSON files on disk
//! - **InMemoryDialogueLog** - Session transcripts in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileDialogueLog, InMemorySessionStore};
//!
//! let store = InMemorySessionStore::new(Duration::from_secs(1800), 1000);
//! let log = FileDialogueLog::new("./dials");
//! ```

mod file_dialogue_log;
mod in_memory_dialogue_log;
mod in_memory_session_store;

pub use file_dialogue_log::FileDialogueLog;
pub use in_memory_dialogue_log::InMemoryDialogueLog;
pub use in_memory_session_store::InMemorySessionStore;
