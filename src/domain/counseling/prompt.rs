//! Prompt builders for the counselor generation and the safety review.

use super::phrases::TERMINATION_SENTINEL;
use super::turn::{History, Turn};

/// Number of most recent turns included in the counselor prompt.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

const COUNSELOR_HEADER: &str = "Generate counselor's next utterance in korean.\nHistory:\n";

/// Builds the next-turn prompt from the last `window` turns.
pub fn counselor_prompt(history: &History, window: usize) -> String {
    let mut prompt = String::from(COUNSELOR_HEADER);
    push_transcript(&mut prompt, history.recent(window));
    prompt
}

/// Builds the supervisor prompt that reviews `candidate` against the whole
/// conversation.
pub fn safety_review_prompt(history: &History, candidate: &str) -> String {
    let mut prompt = String::from(
        "You are a smart and attentive supervisor overseeing a conversation \
         between a trainee counselor and a client experiencing a panic attack.\n\
         Your task is to *lightly* review the counselor's latest utterance in the context \
         of the recent dialogue, following Psychological First Aid (PFA) principles:\n\
         \x20 1) Ensure immediate safety\n\
         \x20 2) Support stabilization\n\
         \x20 3) When appropriate, guide the client to a qualified in-person counselor\n\
         \n\
         Preserve the counselor's original message as much as possible.\n\
         \x20  - Keep the core information and intent intact.\n\
         \x20  - Only adjust phrasing to enhance empathy, clarity, and natural flow.\n\
         \x20  - Fix harmful, irrelevant, or context-mismatched parts if they exist.\n\
         \n\
         If the original utterance is already appropriate, return it unchanged.\n",
    );
    prompt.push_str(&format!(
        "If continuing the conversation seems unhelpful or potentially harmful, reply only with: {}.\n",
        TERMINATION_SENTINEL
    ));
    prompt.push_str(
        "Add *no* explanations or comments; your response will be delivered directly to the client.\n\
         Keep the response short and easy to understand, as the client is currently in a state of panic.\n\
         Your entire response must be in Korean.\n\n\
         Conversation History:\n",
    );

    push_transcript(&mut prompt, history.turns());
    prompt.push_str(&Turn::counselor(candidate).transcript_line());
    prompt.push('\n');

    prompt.push_str(&format!(
        "\nNow review the counselor's utterance. Return a revised version if needed, \
         the original if appropriate, or '{}' if the session should end.",
        TERMINATION_SENTINEL
    ));
    prompt
}

fn push_transcript(prompt: &mut String, turns: &[Turn]) {
    for turn in turns {
        prompt.push_str(&turn.transcript_line());
        prompt.push('\n');
    }
}
