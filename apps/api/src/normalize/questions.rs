use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::first_array_literal;

/// Rendered to the user when no tier manages to recover a question list.
pub const UNPARSEABLE_QUESTIONS_PLACEHOLDER: &str =
    "Error: Could not parse questions from the AI response.";

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s*(.+)$").unwrap());

/// Extracts a question list from raw completion output, truncated to `max`.
///
/// Tier 1: first array literal parsed as a JSON string array.
/// Tier 2: numbered-list lines (`1. ...`).
/// Tier 3: a single placeholder element, so the caller always has something
/// to render. The result is never empty.
pub fn extract_questions(raw: &str, max: usize) -> Vec<String> {
    if let Some(literal) = first_array_literal(raw) {
        if let Ok(mut questions) = serde_json::from_str::<Vec<String>>(literal) {
            if !questions.is_empty() {
                questions.truncate(max);
                return questions;
            }
        }
    }

    let mut numbered: Vec<String> = NUMBERED_LINE
        .captures_iter(raw)
        .map(|c| c[1].trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    if !numbered.is_empty() {
        numbered.truncate(max);
        return numbered;
    }

    warn!("Could not parse questions from completion output ({} bytes)", raw.len());
    vec![UNPARSEABLE_QUESTIONS_PLACEHOLDER.to_string()]
}
