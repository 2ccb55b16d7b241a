//! Turns and the append-only conversation history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a turn.
///
/// Serialized with the capitalized label used in prompts and dialogue logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(alias = "counselor")]
    Counselor,
    #[serde(alias = "client")]
    Client,
}

impl Role {
    /// Label used when rendering transcripts (`Counselor`, `Client`).
    pub fn label(&self) -> &'static str {
        match self {
            Role::Counselor => "Counselor",
            Role::Client => "Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message attributed to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub message: String,
}

impl Turn {
    /// Creates a new turn.
    pub fn new(role: Role, message: impl Into<String>) -> Self {
        Self {
            role,
            message: message.into(),
        }
    }

    /// Creates a counselor turn.
    pub fn counselor(message: impl Into<String>) -> Self {
        Self::new(Role::Counselor, message)
    }

    /// Creates a client turn.
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(Role::Client, message)
    }

    /// Renders the turn as a `Role: message` transcript line (no newline).
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.message)
    }
}

/// Ordered, append-only sequence of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Turn>);

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a turn.
    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    /// Returns a copy of this history with one more turn at the end.
    pub fn with_turn(&self, turn: Turn) -> Self {
        let mut extended = self.clone();
        extended.push(turn);
        extended
    }

    /// Returns at most the last `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> &[Turn] {
        let start = self.0.len().saturating_sub(n);
        &self.0[start..]
    }

    /// Returns all turns.
    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    /// Returns the most recent turn.
    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }
}

impl From<Vec<Turn>> for History {
    fn from(turns: Vec<Turn>) -> Self {
        Self(turns)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Role::Counselor).unwrap(), "\"Counselor\"");
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"Client\"");
    }

    #[test]
    fn role_accepts_lowercase_alias() {
        let role: Role = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(role, Role::Client);
    }

    #[test]
    fn transcript_line_uses_label() {
        let turn = Turn::client("숨이 막혀요");
        assert_eq!(turn.transcript_line(), "Client: 숨이 막혀요");
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let history: History = (0..15)
            .map(|i| Turn::client(format!("m{}", i)))
            .collect::<Vec<_>>()
            .into();

        let recent = history.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].message, "m5");
        assert_eq!(recent[9].message, "m14");
    }

    #[test]
    fn recent_on_short_history_returns_everything() {
        let history: History = vec![Turn::counselor("hi")].into();
        assert_eq!(history.recent(10).len(), 1);
    }

    #[test]
    fn with_turn_leaves_original_untouched() {
        let history: History = vec![Turn::counselor("hi")].into();
        let extended = history.with_turn(Turn::client("hello"));

        assert_eq!(history.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.last().unwrap().role, Role::Client);
    }

    #[test]
    fn history_serializes_as_plain_array() {
        let history: History = vec![Turn::counselor("안녕하세요")].into();
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"role":"Counselor","message":"안녕하세요"}]"#);
    }
}
