//! Mock Safety Reviewer for testing.
//!
//! By default echoes the candidate back. Queued verdicts replace the echo in
//! order; every call is recorded.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::counseling::{History, TERMINATION_SENTINEL};
use crate::ports::SafetyReviewer;

/// A recorded review call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCall {
    pub history: History,
    pub candidate: String,
}

/// Mock safety reviewer for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSafetyReviewer {
    verdicts: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<ReviewCall>>>,
}

impl MockSafetyReviewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reviewed text to return instead of the candidate.
    pub fn with_verdict(self, reviewed: impl Into<String>) -> Self {
        self.verdicts.lock().unwrap().push_back(reviewed.into());
        self
    }

    /// Queues the termination sentinel.
    pub fn with_termination(self) -> Self {
        self.with_verdict(TERMINATION_SENTINEL)
    }

    /// Returns the number of calls made to this reviewer.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<ReviewCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SafetyReviewer for MockSafetyReviewer {
    async fn review(&self, history: &History, candidate: &str) -> String {
        self.calls.lock().unwrap().push(ReviewCall {
            history: history.clone(),
            candidate: candidate.to_string(),
        });

        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| candidate.to_string())
    }
}
