//! Safety Reviewer Port - Secondary pass over a candidate counselor utterance.
//!
//! A reviewer either returns the (possibly revised) utterance or the
//! termination sentinel. Review never fails from the caller's point of view:
//! implementations that call out to a model fall back to the sentinel.

use async_trait::async_trait;

use crate::domain::counseling::History;

/// Port for reviewing a candidate utterance against the conversation so far.
#[async_trait]
pub trait SafetyReviewer: Send + Sync {
    /// Reviews `candidate` as the counselor's next line after `history`.
    async fn review(&self, history: &History, candidate: &str) -> String;
}
