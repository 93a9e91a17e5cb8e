use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::first_object_literal;

/// Feedback shown when the evaluation payload cannot be recovered.
pub const TECHNICAL_ISSUE_FEEDBACK: &str = "The AI evaluation encountered a technical issue. \
    Please review your answer and consider providing more specific details.";

/// Feedback shown when the completion service itself is unreachable.
pub const SERVICE_UNAVAILABLE_FEEDBACK: &str =
    "The AI evaluation service is currently unavailable. Please try again later.";

/// The categorical grade assigned to a simulated interview answer.
///
/// Providers return free text here. The four known verdicts are matched
/// case-insensitively; anything else is carried through capitalized in
/// `Other` rather than rejected, so an unexpected provider verdict still
/// renders instead of failing the evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    PartiallyCorrect,
    Incorrect,
    Error,
    Other(String),
}

impl Verdict {
    /// Canonicalizes a provider verdict string.
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "correct" => Verdict::Correct,
            "partially correct" => Verdict::PartiallyCorrect,
            "incorrect" => Verdict::Incorrect,
            "error" => Verdict::Error,
            _ => Verdict::Other(capitalize(raw.trim())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Correct => "Correct",
            Verdict::PartiallyCorrect => "Partially Correct",
            Verdict::Incorrect => "Incorrect",
            Verdict::Error => "Error",
            Verdict::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Verdict::from_provider(&raw))
    }
}

/// First letter uppercased, the rest lowercased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// A model answer as returned by the provider: usually plain text, sometimes
/// a structured object. The shape is decided once here at the parse boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelAnswer {
    PlainText(String),
    Structured(Value),
}

impl ModelAnswer {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ModelAnswer::PlainText(String::new()),
            Some(Value::String(s)) => ModelAnswer::PlainText(s.trim().to_string()),
            Some(obj @ Value::Object(_)) => ModelAnswer::Structured(obj.clone()),
            // Numbers, booleans, arrays: stringify as-is
            Some(other) => ModelAnswer::PlainText(other.to_string()),
        }
    }

    /// Renders the answer to the text form used for storage and display.
    pub fn into_text(self) -> String {
        match self {
            ModelAnswer::PlainText(text) => text,
            ModelAnswer::Structured(value) => value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ModelAnswer::PlainText(text) if text.is_empty())
    }
}

/// The evaluation fields recovered from one completion payload, before being
/// joined with the question/answer pair that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationFragment {
    pub verdict: Verdict,
    pub feedback: String,
    pub model_answer: ModelAnswer,
}

impl EvaluationFragment {
    /// The fixed fragment returned when the payload resists all repair tiers.
    pub fn technical_issue() -> Self {
        Self {
            verdict: Verdict::PartiallyCorrect,
            feedback: TECHNICAL_ISSUE_FEEDBACK.to_string(),
            model_answer: ModelAnswer::PlainText(String::new()),
        }
    }
}

/// One graded question/answer pair, order-aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub question: String,
    pub answer: String,
    pub verdict: Verdict,
    pub feedback: String,
    pub model_answer: String,
}

impl AnswerEvaluation {
    /// Joins a recovered fragment with its question/answer pair. Correct
    /// answers never carry a model answer.
    pub fn from_fragment(question: String, answer: String, fragment: EvaluationFragment) -> Self {
        let model_answer = if fragment.verdict == Verdict::Correct {
            String::new()
        } else {
            fragment.model_answer.into_text()
        };
        Self {
            question,
            answer,
            verdict: fragment.verdict,
            feedback: fragment.feedback,
            model_answer,
        }
    }

    /// The evaluation recorded when the provider could not be reached at all.
    pub fn service_unavailable(question: String, answer: String) -> Self {
        Self {
            question,
            answer,
            verdict: Verdict::Error,
            feedback: SERVICE_UNAVAILABLE_FEEDBACK.to_string(),
            model_answer: String::new(),
        }
    }
}

/// Extracts an evaluation fragment from raw completion output.
///
/// Locates the first object literal, applies a fixed sequence of textual
/// repairs (providers routinely emit HTML entities, control characters, and
/// doubled escaping), then parses. Any failure yields the fixed
/// technical-issue fragment; this function never errors.
pub fn extract_evaluation(raw: &str) -> EvaluationFragment {
    let Some(literal) = first_object_literal(raw) else {
        warn!("No object literal found in evaluation output ({} bytes)", raw.len());
        return EvaluationFragment::technical_issue();
    };

    let repaired = repair_json(literal);

    let parsed: Value = match serde_json::from_str(&repaired) {
        Ok(value) => value,
        Err(e) => {
            warn!("Evaluation JSON unparseable after repair: {e}");
            return EvaluationFragment::technical_issue();
        }
    };

    let verdict = Verdict::from_provider(
        parsed
            .get("verdict")
            .and_then(Value::as_str)
            .unwrap_or("Incomplete"),
    );
    let feedback = parsed
        .get("feedback")
        .and_then(Value::as_str)
        .unwrap_or("No feedback provided.")
        .trim()
        .to_string();
    let model_answer = ModelAnswer::from_value(parsed.get("model_answer"));

    EvaluationFragment {
        verdict,
        feedback,
        model_answer,
    }
}

/// The fixed repair sequence, applied in order:
/// named HTML entities, control-character strip (newline, carriage return and
/// tab survive), doubled quote-escaping, doubled backslash-escaping.
fn repair_json(literal: &str) -> String {
    let mut repaired = literal
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    repaired.retain(|c| c as u32 >= 32 || matches!(c, '\n' | '\r' | '\t'));
    repaired = repaired.replace("\\\"", "\"");
    repaired.replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_payload_embedded_in_prose() {
        let raw = concat!(
            "Here is my evaluation:\n",
            r#"{"verdict": "correct", "feedback": "ok &amp; good", "model_answer": ""}"#,
            "\nHope that helps."
        );
        let fragment = extract_evaluation(raw);
        assert_eq!(fragment.verdict, Verdict::Correct);
        assert_eq!(fragment.feedback, "ok & good");
        assert!(fragment.model_answer.is_empty());
    }

    #[test]
    fn test_html_entity_quotes_repaired() {
        let raw = r#"{&quot;verdict&quot;: &quot;Incorrect&quot;, &quot;feedback&quot;: &quot;Too vague.&quot;}"#;
        let fragment = extract_evaluation(raw);
        assert_eq!(fragment.verdict, Verdict::Incorrect);
        assert_eq!(fragment.feedback, "Too vague.");
    }

    #[test]
    fn test_control_characters_stripped() {
        let raw = "{\"verdict\": \"Correct\", \"feedback\": \"good\u{0000}\u{0008} answer\"}";
        let fragment = extract_evaluation(raw);
        assert_eq!(fragment.feedback, "good answer");
    }

    #[test]
    fn test_doubled_escaping_collapsed() {
        let raw = r#"{\"verdict\": \"Correct\", \"feedback\": \"fine\"}"#;
        let fragment = extract_evaluation(raw);
        assert_eq!(fragment.verdict, Verdict::Correct);
        assert_eq!(fragment.feedback, "fine");
    }

    #[test]
    fn test_no_braces_yields_fallback() {
        let fragment = extract_evaluation("the model said nothing useful");
        assert_eq!(fragment, EvaluationFragment::technical_issue());
        assert_eq!(fragment.verdict, Verdict::PartiallyCorrect);
    }

    #[test]
    fn test_unrepairable_json_yields_fallback() {
        let fragment = extract_evaluation("{this is not json at all}");
        assert_eq!(fragment.verdict, Verdict::PartiallyCorrect);
        assert_eq!(fragment.feedback, TECHNICAL_ISSUE_FEEDBACK);
    }

    #[test]
    fn test_missing_fields_defaulted() {
        let fragment = extract_evaluation("{}");
        assert_eq!(fragment.verdict, Verdict::Other("Incomplete".to_string()));
        assert_eq!(fragment.feedback, "No feedback provided.");
        assert!(fragment.model_answer.is_empty());
    }

    #[test]
    fn test_structured_model_answer() {
        let raw = r#"{"verdict": "Incorrect", "feedback": "See below.", "model_answer": {"steps": ["one", "two"]}}"#;
        let fragment = extract_evaluation(raw);
        match &fragment.model_answer {
            ModelAnswer::Structured(value) => assert!(value.get("steps").is_some()),
            other => panic!("expected structured model answer, got {other:?}"),
        }
        let text = fragment.model_answer.into_text();
        assert!(text.contains("steps"));
    }

    #[test]
    fn test_numeric_model_answer_stringified() {
        let raw = r#"{"verdict": "Incorrect", "model_answer": 42}"#;
        let fragment = extract_evaluation(raw);
        assert_eq!(fragment.model_answer, ModelAnswer::PlainText("42".to_string()));
    }

    #[test]
    fn test_verdict_case_normalization() {
        assert_eq!(Verdict::from_provider("CORRECT"), Verdict::Correct);
        assert_eq!(
            Verdict::from_provider("partially correct"),
            Verdict::PartiallyCorrect
        );
        assert_eq!(Verdict::from_provider(" Incorrect "), Verdict::Incorrect);
        assert_eq!(Verdict::from_provider("error"), Verdict::Error);
    }

    #[test]
    fn test_unknown_verdict_capitalized_not_rejected() {
        assert_eq!(
            Verdict::from_provider("EXCELLENT"),
            Verdict::Other("Excellent".to_string())
        );
        assert_eq!(Verdict::Other("Excellent".to_string()).as_str(), "Excellent");
    }

    #[test]
    fn test_verdict_serde_round_trip() {
        let json = serde_json::to_string(&Verdict::PartiallyCorrect).unwrap();
        assert_eq!(json, r#""Partially Correct""#);
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Verdict::PartiallyCorrect);
    }

    #[test]
    fn test_correct_verdict_blanks_model_answer() {
        let fragment = EvaluationFragment {
            verdict: Verdict::Correct,
            feedback: "Spot on.".to_string(),
            model_answer: ModelAnswer::PlainText("not needed".to_string()),
        };
        let evaluation =
            AnswerEvaluation::from_fragment("Q?".to_string(), "A.".to_string(), fragment);
        assert_eq!(evaluation.model_answer, "");
    }

    #[test]
    fn test_non_correct_verdict_keeps_model_answer() {
        let fragment = EvaluationFragment {
            verdict: Verdict::Incorrect,
            feedback: "Missing detail.".to_string(),
            model_answer: ModelAnswer::PlainText("A better answer.".to_string()),
        };
        let evaluation =
            AnswerEvaluation::from_fragment("Q?".to_string(), "A.".to_string(), fragment);
        assert_eq!(evaluation.model_answer, "A better answer.");
    }

    #[test]
    fn test_service_unavailable_shape() {
        let evaluation =
            AnswerEvaluation::service_unavailable("Q?".to_string(), "A.".to_string());
        assert_eq!(evaluation.verdict, Verdict::Error);
        assert_eq!(evaluation.feedback, SERVICE_UNAVAILABLE_FEEDBACK);
        assert_eq!(evaluation.model_answer, "");
    }

    #[test]
    fn test_feedback_trimmed() {
        let raw = r#"{"verdict": "Correct", "feedback": "  solid answer  "}"#;
        assert_eq!(extract_evaluation(raw).feedback, "solid answer");
    }
}
