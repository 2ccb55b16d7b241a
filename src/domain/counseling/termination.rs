//! Session-termination detection.

/// Decides whether an utterance signals that the session should end.
pub trait TerminationPolicy: Send + Sync {
    fn should_terminate(&self, utterance: &str) -> bool;
}

/// Fires when the utterance contains both configured tokens as substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTermination {
    counseling_token: String,
    end_token: String,
}

impl KeywordTermination {
    pub fn new(counseling_token: impl Into<String>, end_token: impl Into<String>) -> Self {
        Self {
            counseling_token: counseling_token.into(),
            end_token: end_token.into(),
        }
    }
}

impl Default for KeywordTermination {
    /// `상담` ("counseling") and `종료` ("end").
    fn default() -> Self {
        Self::new("상담", "종료")
    }
}

impl TerminationPolicy for KeywordTermination {
    fn should_terminate(&self, utterance: &str) -> bool {
        utterance.contains(&self.counseling_token) && utterance.contains(&self.end_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::counseling::phrases::TERMINATION_SENTINEL;

    #[test]
    fn fires_on_sentinel() {
        assert!(KeywordTermination::default().should_terminate(TERMINATION_SENTINEL));
    }

    #[test]
    fn requires_both_tokens() {
        let policy = KeywordTermination::default();
        assert!(!policy.should_terminate("상담을 계속할게요"));
        assert!(!policy.should_terminate("회의가 종료되었어요"));
        assert!(policy.should_terminate("오늘 상담은 여기서 종료할게요"));
    }

    #[test]
    fn tokens_may_appear_in_any_order() {
        assert!(KeywordTermination::default().should_terminate("종료하기 전에 상담 내용을 정리할게요"));
    }

    #[test]
    fn custom_tokens_are_respected() {
        let policy = KeywordTermination::new("session", "end");
        assert!(policy.should_terminate("the session will end now"));
        assert!(!policy.should_terminate("상담을 종료합니다"));
    }
}
