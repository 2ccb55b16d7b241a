//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional config file and from
//! environment variables with the `COUNSELOR` prefix; nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use counselor_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod generation;
mod safety;
mod server;
mod session;

pub use error::{ConfigError, ValidationError};
pub use generation::{Device, GenerationConfig};
pub use safety::SafetyConfig;
pub use server::{LogFormat, ServerConfig};
pub use session::{ExpiryPolicy, SessionConfig};

use serde::Deserialize;

/// Environment variable naming the optional config file.
pub const CONFIG_FILE_ENV: &str = "COUNSELOR_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "counselor.json";

/// Root application configuration
///
/// Load using [`AppConfig::load()`], which reads the optional config file and
/// then environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation backend configuration (hosted or local model)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Safety review configuration
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Session lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from the config file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the file named by `COUNSELOR_CONFIG` (default `counselor.json`),
    ///    if it exists; JSON and TOML are recognised by extension
    /// 3. Overrides with environment variables with `COUNSELOR` prefix,
    ///    using `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COUNSELOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COUNSELOR__SAFETY__SAFETY_API_KEY=...` -> `safety.safety_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is malformed or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::default()
                    .prefix("COUNSELOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.generation.validate()?;
        self.safety.validate()?;
        self.session.validate()?;
        Ok(())
    }
}
