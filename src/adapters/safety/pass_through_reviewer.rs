//! Pass-through reviewer, used when the safety pass is disabled.

use async_trait::async_trait;

use crate::domain::counseling::History;
use crate::ports::SafetyReviewer;

/// Returns every candidate unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughReviewer;

#[async_trait]
impl SafetyReviewer for PassThroughReviewer {
    async fn review(&self, _history: &History, candidate: &str) -> String {
        candidate.to_string()
    }
}
