//! Application layer - Turn generation, command handlers and background tasks.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod counselor_turn;
pub mod expiry;
pub mod handlers;
pub mod readiness;

pub use counselor_turn::{CounselorTurnGenerator, Draft, TerminationCause, TurnOutcome};
pub use expiry::SessionSweeper;
pub use handlers::{
    ChatError, ChatTurnCommand, ChatTurnHandler, ChatTurnResult, InitSessionHandler,
    InitSessionResult,
};
pub use readiness::{NotReady, ReadinessGate, ReadinessState};
