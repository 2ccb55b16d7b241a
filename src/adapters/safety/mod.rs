//! Safety Reviewer Adapters.
//!
//! - `GeminiReviewer` - Review through Gemini `generateContent`, fail-closed
//! - `PassThroughReviewer` - No review (safety pass disabled)
//! - `MockSafetyReviewer` - Configurable mock for testing

mod gemini_reviewer;
mod mock_reviewer;
mod pass_through_reviewer;

pub use gemini_reviewer::{GeminiReviewer, GeminiReviewerConfig};
pub use mock_reviewer::{MockSafetyReviewer, ReviewCall};
pub use pass_through_reviewer::PassThroughReviewer;
