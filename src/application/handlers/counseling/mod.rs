//! Counseling command handlers.

mod chat_turn;
mod error;
mod init_session;

pub use chat_turn::{ChatTurnCommand, ChatTurnHandler, ChatTurnResult};
pub use error::ChatError;
pub use init_session::{InitSessionHandler, InitSessionResult};
