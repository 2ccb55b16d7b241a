//! Counselor turn generation.
//!
//! One turn runs: prompt from recent history, raw generation, well-formedness
//! gate, cleanup, termination check, safety review. Only the backend call can
//! fail; every other problem resolves to a fixed utterance.

use std::sync::Arc;

use crate::domain::counseling::{
    clean_generation, counselor_prompt, is_well_formed, History, TerminationPolicy,
    DEFAULT_HISTORY_WINDOW, FALLBACK_MESSAGE,
};
use crate::ports::{BackendInfo, GenerationBackend, GenerationError, SafetyReviewer};

/// Cleaned, unreviewed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    /// The raw generation carried no role marker.
    Unusable,
    /// Single cleaned line, possibly empty.
    Clean(String),
}

/// Which check ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// The cleaned draft asked to end the session; no review ran.
    Draft,
    /// The safety review answered with an ending.
    Review,
}

/// What the counselor does this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Deliver the reviewed utterance.
    Reply(String),
    /// Deliver the fixed fallback message.
    Fallback,
    /// Deliver the closing line and end the session.
    Terminate(TerminationCause),
}

impl TurnOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnOutcome::Terminate(_))
    }

    /// Text delivered to the client for this outcome.
    pub fn utterance<'a>(&'a self, closing_line: &'a str) -> &'a str {
        match self {
            TurnOutcome::Reply(text) => text,
            TurnOutcome::Fallback => FALLBACK_MESSAGE,
            TurnOutcome::Terminate(_) => closing_line,
        }
    }
}

/// Produces counselor turns from a conversation history.
pub struct CounselorTurnGenerator {
    backend: Arc<dyn GenerationBackend>,
    reviewer: Arc<dyn SafetyReviewer>,
    termination: Arc<dyn TerminationPolicy>,
    closing_line: String,
    history_window: usize,
}

impl CounselorTurnGenerator {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        reviewer: Arc<dyn SafetyReviewer>,
        termination: Arc<dyn TerminationPolicy>,
        closing_line: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            reviewer,
            termination,
            closing_line: closing_line.into(),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    /// Sets how many recent turns go into the prompt.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window.max(1);
        self
    }

    pub fn closing_line(&self) -> &str {
        &self.closing_line
    }

    pub fn backend_info(&self) -> BackendInfo {
        self.backend.backend_info()
    }

    /// Generates and cleans a candidate utterance without reviewing it.
    pub async fn draft(&self, history: &History) -> Result<Draft, GenerationError> {
        let prompt = counselor_prompt(history, self.history_window);
        tracing::debug!(prompt = %prompt, "Counselor prompt built");

        let raw = self.backend.complete(&prompt).await?;
        tracing::debug!(raw = %raw, "Raw generation received");

        if !is_well_formed(&raw) {
            return Ok(Draft::Unusable);
        }

        Ok(Draft::Clean(clean_generation(&raw)))
    }

    /// Decides the counselor's next turn after `history`, whose last turn is
    /// the client's message.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the backend call fails. Review failures
    /// never surface here.
    pub async fn next_turn(&self, history: &History) -> Result<TurnOutcome, GenerationError> {
        let candidate = match self.draft(history).await? {
            Draft::Unusable => {
                tracing::warn!("Generation unusable; substituting fallback message");
                return Ok(TurnOutcome::Fallback);
            }
            Draft::Clean(candidate) => candidate,
        };

        if self.termination.should_terminate(&candidate) {
            tracing::info!(draft = %candidate, "Draft requested session end");
            return Ok(TurnOutcome::Terminate(TerminationCause::Draft));
        }

        let reviewed = self.reviewer.review(history, &candidate).await;

        if self.termination.should_terminate(&reviewed) {
            tracing::info!("Safety review ended the session");
            return Ok(TurnOutcome::Terminate(TerminationCause::Review));
        }
        Ok(TurnOutcome::Reply(reviewed))
    }

    /// Generates the counselor's next utterance as delivered to the client.
    pub async fn generate(&self, history: &History) -> Result<String, GenerationError> {
        let outcome = self.next_turn(history).await?;
        Ok(outcome.utterance(&self.closing_line).to_string())
    }
}
