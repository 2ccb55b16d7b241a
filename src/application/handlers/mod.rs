//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod counseling;

pub use counseling::{
    ChatError, ChatTurnCommand, ChatTurnHandler, ChatTurnResult, InitSessionHandler,
    InitSessionResult,
};
