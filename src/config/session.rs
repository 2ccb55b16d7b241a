//! Session lifecycle configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::counseling::DEFAULT_CLIENT_MESSAGE;

/// Session lifecycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Counselor line that opens every session
    #[serde(default = "default_opening_line")]
    pub opening_line: String,

    /// Counselor line that closes a terminated session
    #[serde(default = "default_closing_line")]
    pub closing_line: String,

    /// Sample client message served by `/default-message`
    #[serde(default = "default_client_message")]
    pub default_client_message: String,

    /// Idle time before a session expires, in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Maximum number of live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Interval between expiry sweeps, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Directory holding per-session dialogue logs
    #[serde(default = "default_dialogue_dir")]
    pub dialogue_dir: PathBuf,

    /// What happens to a session that expires
    #[serde(default)]
    pub expiry_policy: ExpiryPolicy,

    /// First token that must appear for a draft to end the session
    #[serde(default = "default_counseling_token")]
    pub counseling_token: String,

    /// Second token that must appear for a draft to end the session
    #[serde(default = "default_end_token")]
    pub end_token: String,
}

/// Treatment of sessions that expire while idle
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryPolicy {
    /// Drop the session; the log keeps the last completed turn
    #[default]
    Silent,
    /// Append the closing line and persist before dropping
    Farewell,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.opening_line.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__OPENING_LINE"));
        }
        if self.closing_line.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__CLOSING_LINE"));
        }
        if self.counseling_token.is_empty() || self.end_token.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__COUNSELING_TOKEN / SESSION__END_TOKEN"));
        }
        if self.ttl_secs == 0 {
            return Err(ValidationError::MustBePositive("session.ttl_secs"));
        }
        if self.max_sessions == 0 {
            return Err(ValidationError::MustBePositive("session.max_sessions"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::MustBePositive("session.sweep_interval_secs"));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opening_line: default_opening_line(),
            closing_line: default_closing_line(),
            default_client_message: default_client_message(),
            ttl_secs: default_ttl(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval(),
            dialogue_dir: default_dialogue_dir(),
            expiry_policy: ExpiryPolicy::default(),
            counseling_token: default_counseling_token(),
            end_token: default_end_token(),
        }
    }
}

fn default_opening_line() -> String {
    "안녕하세요. 저는 상담사입니다. 지금 어떤 점이 가장 힘드신가요?".to_string()
}

fn default_closing_line() -> String {
    "오늘 상담은 여기서 마치겠습니다. 힘든 순간에도 이야기해 주셔서 고맙습니다. 필요하면 언제든 다시 찾아 주세요.".to_string()
}

fn default_client_message() -> String {
    DEFAULT_CLIENT_MESSAGE.to_string()
}

fn default_ttl() -> u64 {
    1800
}

fn default_max_sessions() -> usize {
    1000
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_dialogue_dir() -> PathBuf {
    PathBuf::from("./dials")
}

fn default_counseling_token() -> String {
    "상담".to_string()
}

fn default_end_token() -> String {
    "종료".to_string()
}
