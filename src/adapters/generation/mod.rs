//! Generation Backend Adapters.
//!
//! Implementations of the GenerationBackend port.
//!
//! ## Available Adapters
//!
//! - `HostedCompletionProvider` - OpenAI-style text-completion service (vLLM)
//! - `LocalModelProvider` - Model served by a local Ollama-compatible runtime
//! - `SelectedBackend` - One of the above, picked from configuration
//! - `MockGenerationBackend` - Configurable mock for testing

mod backend_selector;
mod hosted_completion_provider;
mod local_model_provider;
mod mock_backend;

pub use backend_selector::SelectedBackend;
pub use hosted_completion_provider::{HostedCompletionConfig, HostedCompletionProvider};
pub use local_model_provider::{strip_special_tokens, LocalModelConfig, LocalModelProvider};
pub use mock_backend::{MockGenerationBackend, MockGenerationError, DEFAULT_MOCK_GENERATION};
