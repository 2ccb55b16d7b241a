//! Session aggregate.
//!
//! A session is one linear counselor/client conversation. It is created with
//! the opening counselor line already in its history and moves through
//! `Active -> Terminated`.
//!
//! # Invariants
//!
//! - `turn_count` starts at 1 and grows by exactly 1 per completed turn
//! - history is append-only
//! - a terminated session accepts no further turns

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::turn::{History, Turn};
use crate::domain::foundation::{SessionId, ValidationError};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Active,
    Terminated,
}

/// Errors raised by session lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session '{0}' has already terminated")]
    Terminated(SessionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A single counseling conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    turn_count: u32,
    history: History,
    state: SessionState,
}

impl Session {
    /// Creates an active session seeded with the counselor's opening line.
    ///
    /// # Errors
    ///
    /// - `Validation` if the opening line is blank
    pub fn create(id: SessionId, opening_line: impl Into<String>) -> Result<Self, SessionError> {
        let opening_line = opening_line.into();
        if opening_line.trim().is_empty() {
            return Err(ValidationError::empty_field("opening_line").into());
        }

        let mut history = History::new();
        history.push(Turn::counselor(opening_line));

        Ok(Self {
            id,
            turn_count: 1,
            history,
            state: SessionState::Active,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Checks that the session can take another turn and that the client
    /// message is usable, returning the client turn to generate against.
    ///
    /// Nothing is recorded; the history stays as of the last completed turn
    /// until [`Session::complete_turn`] or [`Session::terminate`] commits.
    ///
    /// # Errors
    ///
    /// - `Terminated` if the session already ended
    /// - `Validation` if the message is blank
    pub fn begin_turn(&self, client_message: &str) -> Result<Turn, SessionError> {
        self.ensure_active()?;
        if client_message.trim().is_empty() {
            return Err(ValidationError::empty_field("user_utterance").into());
        }
        Ok(Turn::client(client_message))
    }

    /// Records a completed turn: the client message followed by the reply.
    ///
    /// # Errors
    ///
    /// - `Terminated` if the session already ended
    pub fn complete_turn(&mut self, client: Turn, reply: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.history.push(client);
        self.history.push(Turn::counselor(reply));
        self.turn_count += 1;
        Ok(())
    }

    /// Records the final turn, ending with `closing_line`, and marks the
    /// session terminated.
    ///
    /// # Errors
    ///
    /// - `Terminated` if the session already ended
    pub fn terminate(&mut self, client: Turn, closing_line: impl Into<String>) -> Result<(), SessionError> {
        self.complete_turn(client, closing_line)?;
        self.state = SessionState::Terminated;
        Ok(())
    }

    /// Ends an idle session by appending a counselor farewell without a
    /// client turn. The turn counter is left alone.
    ///
    /// # Errors
    ///
    /// - `Terminated` if the session already ended
    pub fn expire_with_farewell(&mut self, closing_line: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.history.push(Turn::counselor(closing_line));
        self.state = SessionState::Terminated;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Terminated => Err(SessionError::Terminated(self.id.clone())),
        }
    }
}
