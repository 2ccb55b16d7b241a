//! Well-formedness gate and cleanup pipeline for raw counselor generations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sanitizer::remove_speaker_turns;
use super::turn::Role;

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket pattern"));

static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthesis pattern"));

/// Lowercase markers, at least one of which a usable generation must contain.
pub const ROLE_MARKERS: [&str; 4] = ["counselor", "상담사", "assistant", "客人"];

/// Label words stripped from the cleaned utterance, in removal order.
const ECHOED_LABELS: [&str; 10] = [
    "History:",
    "history:",
    "History",
    "history",
    "Counselor",
    "counselor",
    "상담사",
    "Assistant",
    "assistant",
    "客人",
];

/// Returns true when the raw generation mentions any role marker
/// (case-insensitive).
pub fn is_well_formed(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    ROLE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Repairs the recoverable artifacts of a well-formed generation.
///
/// Order is fixed: client turns, colons, `[...]`, `(...)`, echoed labels,
/// trim, first line only.
pub fn clean_generation(raw: &str) -> String {
    let without_client = remove_speaker_turns(raw.trim(), Role::Client.label());
    let without_colons = without_client.replace(':', "");
    let without_brackets = BRACKETED.replace_all(&without_colons, "");
    let mut cleaned = PARENTHESIZED.replace_all(&without_brackets, "").into_owned();

    for label in ECHOED_LABELS {
        cleaned = cleaned.replace(label, "");
    }

    cleaned
        .trim()
        .split('\n')
        .next()
        .unwrap_or_default()
        .to_string()
}
