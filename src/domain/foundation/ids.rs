//! Strongly-typed identifier value objects.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Longest accepted session token.
const MAX_SESSION_ID_LEN: usize = 64;

/// Identifier for a counseling session.
///
/// Freshly generated ids look like `20250114_093012_9f3a1c2e` (local time plus
/// eight random hex digits). Ids double as dialogue log file names, so parsing
/// only admits ASCII alphanumerics, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new time-prefixed random SessionId.
    pub fn generate() -> Self {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{}_{}", timestamp, &random[..8]))
    }

    /// Parses a client-supplied session token.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if raw.len() > MAX_SESSION_ID_LEN {
            return Err(ValidationError::invalid_format(
                "session_id",
                format!("longer than {} characters", MAX_SESSION_ID_LEN),
            ));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(ValidationError::invalid_format(
                "session_id",
                format!("contains '{}'", bad),
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
