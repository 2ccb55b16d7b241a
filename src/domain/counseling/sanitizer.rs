//! Speaker-label stripping for raw model transcripts.

use once_cell::sync::Lazy;
use regex::Regex;

/// A line that opens with another speaker label, e.g. `\nCounselor:`.
static NEXT_SPEAKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[A-Za-z]+:").expect("valid speaker pattern"));

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid newline pattern"));

/// Removes every span that starts with `"{label}:"`.
///
/// A span runs up to (not including) the next newline followed by any
/// `Word:` speaker label, or to the end of the text, so multi-line content is
/// removed with it. Runs of blank lines left behind collapse to a single
/// newline and the result is trimmed.
pub fn remove_speaker_turns(text: &str, label: &str) -> String {
    let marker = format!("{}:", label);
    let mut kept = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(&marker) {
        kept.push_str(&rest[..start]);
        let after = &rest[start + marker.len()..];
        let end = NEXT_SPEAKER.find(after).map_or(after.len(), |m| m.start());
        rest = &after[end..];
    }
    kept.push_str(rest);

    BLANK_RUNS.replace_all(&kept, "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn removes_single_client_turn() {
        let text = "Counselor: 천천히 숨 쉬어 보세요.\nClient: 너무 무서워요\nCounselor: 괜찮아요.";
        assert_eq!(
            remove_speaker_turns(text, "Client"),
            "Counselor: 천천히 숨 쉬어 보세요.\nCounselor: 괜찮아요."
        );
    }

    #[test]
    fn removes_multiline_client_content() {
        let text = "Counselor: 어떠세요?\nClient: 첫 줄\n둘째 줄\n셋째 줄\nCounselor: 그렇군요.";
        assert_eq!(
            remove_speaker_turns(text, "Client"),
            "Counselor: 어떠세요?\nCounselor: 그렇군요."
        );
    }

    #[test]
    fn removes_trailing_client_turn_to_end_of_text() {
        let text = "Counselor: 괜찮아요.\nClient: 아니요\n정말 아니에요";
        assert_eq!(remove_speaker_turns(text, "Client"), "Counselor: 괜찮아요.");
    }

    #[test]
    fn consecutive_client_turns_are_all_removed() {
        let text = "Client: 하나\nClient: 둘\nCounselor: 셋";
        assert_eq!(remove_speaker_turns(text, "Client"), "Counselor: 셋");
    }

    #[test]
    fn label_in_middle_of_line_starts_a_span() {
        let text = "Counselor: 좋아요 Client: 싫어요\nCounselor: 알겠어요";
        assert_eq!(
            remove_speaker_turns(text, "Client"),
            "Counselor: 좋아요 \nCounselor: 알겠어요"
        );
    }

    #[test]
    fn collapses_blank_runs_and_trims() {
        let text = "\n\nCounselor: a\n\n\nClient: b\nCounselor: c\n\n";
        assert_eq!(remove_speaker_turns(text, "Client"), "Counselor: a\nCounselor: c");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(remove_speaker_turns("", "Client"), "");
    }

    #[test]
    fn text_without_label_is_only_normalized() {
        assert_eq!(remove_speaker_turns("  괜찮아요  ", "Client"), "괜찮아요");
    }

    #[test]
    fn other_label_can_be_removed() {
        let text = "Counselor: a\nClient: b";
        assert_eq!(remove_speaker_turns(text, "Counselor"), "Client: b");
    }

    proptest! {
        #[test]
        fn neighbouring_span_survives(
            client in "[가-힣 ]{0,20}",
            counselor in "[가-힣 ]{1,20}",
        ) {
            let text = format!("Client: {}\nCounselor: {}", client, counselor);
            let cleaned = remove_speaker_turns(&text, "Client");
            prop_assert_eq!(cleaned, format!("Counselor: {}", counselor).trim().to_string());
        }

        #[test]
        fn idempotent(text in "[A-Za-z가-힣 :\n]{0,80}") {
            let once = remove_speaker_turns(&text, "Client");
            let twice = remove_speaker_turns(&once, "Client");
            prop_assert_eq!(once, twice);
        }
    }
}
