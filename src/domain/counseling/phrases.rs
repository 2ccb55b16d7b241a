//! Fixed phrases delivered to clients.

/// Substituted when a raw generation carries no role marker at all.
pub const FALLBACK_MESSAGE: &str = "그러시군요. 오늘 정말 수고하셨어요. 만약 증상이 계속된다면 전문가의 도움을 받는 것이 좋습니다. 당신은 혼자가 아니에요. 언제든지 도움이 필요하면 말씀해 주세요.";

/// Returned by the safety review to end the session, and on any review failure.
pub const TERMINATION_SENTINEL: &str = "상담을 종료합니다";

/// Default sample client message offered by the chat UI.
pub const DEFAULT_CLIENT_MESSAGE: &str =
    "지금 카페인데 사람이 너무 많아요 어지럽고 메스꺼워요.. 어떡하죠?";
