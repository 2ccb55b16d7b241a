//! Backend selection - one generation backend chosen at construction.

use async_trait::async_trait;

use super::hosted_completion_provider::{HostedCompletionConfig, HostedCompletionProvider};
use super::local_model_provider::{LocalModelConfig, LocalModelProvider};
use crate::config::GenerationConfig;
use crate::ports::{BackendInfo, GenerationBackend, GenerationError};

/// The configured generation backend.
///
/// The variant is fixed for the lifetime of the value.
pub enum SelectedBackend {
    Hosted(HostedCompletionProvider),
    Local(LocalModelProvider),
}

impl SelectedBackend {
    /// Builds the backend named by `use_hosted_backend`.
    ///
    /// The local variant loads its model here, so this can take a long time.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the hosted endpoint is missing or the
    /// local model fails to load.
    pub async fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        if config.use_hosted_backend {
            let endpoint = config
                .endpoint_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .ok_or_else(|| GenerationError::InvalidRequest("no hosted endpoint configured".to_string()))?;

            let hosted = HostedCompletionConfig::new(endpoint, &config.model_identifier)
                .with_temperature(config.temperature)
                .with_max_tokens(config.max_tokens)
                .with_timeout(config.timeout());

            Ok(Self::Hosted(HostedCompletionProvider::new(hosted)?))
        } else {
            let local = LocalModelConfig::new(&config.local_runtime_url, &config.model_identifier)
                .with_device(config.device)
                .with_max_new_tokens(config.max_tokens)
                .with_timeout(config.timeout());

            Ok(Self::Local(LocalModelProvider::load(local).await?))
        }
    }

    pub fn is_hosted(&self) -> bool {
        matches!(self, Self::Hosted(_))
    }
}

#[async_trait]
impl GenerationBackend for SelectedBackend {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        match self {
            Self::Hosted(provider) => provider.complete(prompt).await,
            Self::Local(provider) => provider.complete(prompt).await,
        }
    }

    fn backend_info(&self) -> BackendInfo {
        match self {
            Self::Hosted(provider) => provider.backend_info(),
            Self::Local(provider) => provider.backend_info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn hosted_flag_selects_hosted_backend_without_network() {
        let config = GenerationConfig {
            model_identifier: "counselor-7b".to_string(),
            endpoint_url: Some("http://127.0.0.1:9/v1".to_string()),
            ..Default::default()
        };

        let backend = SelectedBackend::from_config(&config).await.unwrap();
        assert!(backend.is_hosted());
        assert_eq!(backend.backend_info(), BackendInfo::new("hosted", "counselor-7b"));
    }

    #[tokio::test]
    async fn hosted_without_endpoint_is_rejected() {
        let config = GenerationConfig {
            model_identifier: "counselor-7b".to_string(),
            ..Default::default()
        };

        let result = SelectedBackend::from_config(&config).await;
        assert!(matches!(result, Err(GenerationError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn local_flag_loads_local_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
            .expect(1)
            .mount(&server)
            .await;

        let config = GenerationConfig {
            use_hosted_backend: false,
            model_identifier: "counselor-local".to_string(),
            local_runtime_url: server.uri(),
            ..Default::default()
        };

        let backend = SelectedBackend::from_config(&config).await.unwrap();
        assert!(!backend.is_hosted());
        assert_eq!(backend.backend_info().kind, "local");
    }
}
