//! Action-tag and emotion extraction over generated text.
//!
//! Both passes are pure functions. The keyword tables are public and
//! ordered: emotion detection walks [`EMOTION_KEYWORDS`] top to bottom and
//! the first group with any keyword contained in the text wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Emotion;

/// `[ACTION:<word>]`. The `ACTION` literal is case-sensitive; the word is not.
static ACTION_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[ACTION:(\w+)\]").unwrap());

/// Emotion keyword groups in priority order.
pub const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (Emotion::Happy, &["happy", "great", "awesome", "love", "yay"]),
    (Emotion::Sad, &["sad", "sorry", "miss"]),
    (Emotion::Excited, &["wow", "amazing", "cool"]),
    (Emotion::Thinking, &["hmm", "think", "wonder"]),
    (Emotion::Laughing, &["haha", "lol", "funny"]),
];

/// Text with action tags removed, plus the action they carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAction {
    /// Display text, trimmed.
    pub text: String,
    /// Lower-cased word of the first tag, if any.
    pub action: Option<String>,
}

/// Pull the first `[ACTION:WORD]` tag out of `text`.
///
/// Every tag is stripped from the display text, but only the first one
/// determines the action. Text without a tag is returned unchanged.
pub fn extract_action(text: &str) -> ExtractedAction {
    match ACTION_TAG.captures(text) {
        Some(caps) => ExtractedAction {
            text: ACTION_TAG.replace_all(text, "").trim().to_string(),
            action: Some(caps[1].to_lowercase()),
        },
        None => ExtractedAction {
            text: text.to_string(),
            action: None,
        },
    }
}

/// Infer an emotion from keywords contained in `text` (case-insensitive).
pub fn detect_emotion(text: &str) -> Emotion {
    let lower = text.to_lowercase();
    EMOTION_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(emotion, _)| *emotion)
        .unwrap_or_default()
}
