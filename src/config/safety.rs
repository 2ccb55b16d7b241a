//! Safety review configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::generation::is_http_url;

/// Safety review configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SafetyConfig {
    /// Run the safety review; when off, cleaned utterances pass through unchanged
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Reviewer model name (e.g. `gemini-pro`)
    #[serde(default = "default_model")]
    pub safety_model_identifier: String,

    /// Reviewer API key
    pub safety_api_key: Option<Secret<String>>,

    /// Reviewer API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Review request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SafetyConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.safety_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate safety configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("SAFETY__SAFETY_API_KEY"));
        }
        if self.safety_model_identifier.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SAFETY__SAFETY_MODEL_IDENTIFIER"));
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("safety.base_url"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("safety"));
        }
        Ok(())
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            safety_model_identifier: default_model(),
            safety_api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safety_config_defaults() {
        let config = SafetyConfig::default();
        assert!(config.enabled);
        assert_eq!(config.safety_model_identifier, "gemini-pro");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_validation_requires_key_when_enabled() {
        let config = SafetyConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("SAFETY__SAFETY_API_KEY"))
        );
    }

    #[test]
    fn test_validation_empty_key_is_missing() {
        let config = SafetyConfig {
            safety_api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_disabled_skips_checks() {
        let config = SafetyConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = SafetyConfig {
            safety_api_key: Some(Secret::new("AIza-test".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
