//! Counseling conversation domain.
//!
//! Holds the pure parts of a counselor turn: transcript types, session
//! lifecycle, text cleanup, prompt construction and termination detection.

mod cleanup;
mod phrases;
mod prompt;
mod sanitizer;
mod session;
mod termination;
mod turn;

pub use cleanup::{clean_generation, is_well_formed, ROLE_MARKERS};
pub use phrases::{DEFAULT_CLIENT_MESSAGE, FALLBACK_MESSAGE, TERMINATION_SENTINEL};
pub use prompt::{counselor_prompt, safety_review_prompt, DEFAULT_HISTORY_WINDOW};
pub use sanitizer::remove_speaker_turns;
pub use session::{Session, SessionError, SessionState};
pub use termination::{KeywordTermination, TerminationPolicy};
pub use turn::{History, Role, Turn};
