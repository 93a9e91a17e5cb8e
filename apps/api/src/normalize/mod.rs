//! Normalizes loosely structured completion-API output into typed records.
//!
//! Providers are not contractually guaranteed to return well-formed JSON, so
//! every extraction path degrades in tiers: strict JSON parse first, then a
//! heuristic text scan, then a fixed placeholder the caller can always render.
//! Nothing in this module returns an error.

mod evaluation;
mod questions;
mod roles;

pub use evaluation::{
    extract_evaluation, AnswerEvaluation, EvaluationFragment, ModelAnswer, Verdict,
};
pub use questions::extract_questions;
pub use roles::{extract_roles, RoleSuggestion};

use once_cell::sync::Lazy;
use regex::Regex;

// Greedy on purpose: spans from the first opening bracket to the last closing
// one, which tolerates nested literals inside the payload.
static ARRAY_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());
static OBJECT_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Returns the first top-level `[ ... ]` span in `raw`, newlines included.
pub(crate) fn first_array_literal(raw: &str) -> Option<&str> {
    ARRAY_LITERAL.find(raw).map(|m| m.as_str())
}

/// Returns the first top-level `{ ... }` span in `raw`, newlines included.
pub(crate) fn first_object_literal(raw: &str) -> Option<&str> {
    OBJECT_LITERAL.find(raw).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_literal_spans_newlines() {
        let raw = "Here you go:\n[\n  \"a\",\n  \"b\"\n]\nGood luck!";
        assert_eq!(first_array_literal(raw), Some("[\n  \"a\",\n  \"b\"\n]"));
    }

    #[test]
    fn test_array_literal_absent() {
        assert!(first_array_literal("no brackets here").is_none());
    }

    #[test]
    fn test_object_literal_greedy_to_last_brace() {
        let raw = r#"prose {"a": {"b": 1}} trailing"#;
        assert_eq!(first_object_literal(raw), Some(r#"{"a": {"b": 1}}"#));
    }
}
