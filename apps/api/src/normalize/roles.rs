use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::first_array_literal;

/// One suggested job role. Only the title is required; providers frequently
/// omit the skill and certification lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    #[serde(rename = "job_title", alias = "title")]
    pub title: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
}

impl RoleSuggestion {
    fn bare(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            skills: None,
            certifications: None,
        }
    }
}

/// An element of the provider's role array: either a full record or a bare
/// title string. Decided once here, so downstream code never re-checks shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRole {
    Full(RoleSuggestion),
    Title(String),
}

/// Extracts role suggestions from raw completion output.
///
/// Tier 1: first array literal parsed as JSON; bare-string elements are
/// wrapped into title-only records, unparseable elements are dropped.
/// Tier 2: hyphen-prefixed lines interpreted as bare titles.
/// Idempotent on its own serialized output.
pub fn extract_roles(raw: &str) -> Vec<RoleSuggestion> {
    if let Some(literal) = first_array_literal(raw) {
        if let Ok(elements) = serde_json::from_str::<Vec<Value>>(literal) {
            let roles: Vec<RoleSuggestion> = elements
                .into_iter()
                .filter_map(|element| match serde_json::from_value::<RawRole>(element) {
                    Ok(RawRole::Full(role)) => Some(role),
                    Ok(RawRole::Title(title)) => Some(RoleSuggestion::bare(title.trim())),
                    Err(e) => {
                        warn!("Dropping unparseable role element: {e}");
                        None
                    }
                })
                .filter(|role| !role.title.trim().is_empty())
                .collect();
            if !roles.is_empty() {
                return roles;
            }
        }
    }

    raw.lines()
        .filter_map(|line| line.trim().strip_prefix('-'))
        .map(|rest| rest.trim_start_matches('-').trim())
        .filter(|title| !title.is_empty())
        .map(RoleSuggestion::bare)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_records_parse() {
        let raw = r#"[
            {"job_title": "Backend Engineer", "skills": ["Rust", "SQL"], "certifications": ["AWS SAA"]},
            {"job_title": "Data Engineer", "skills": ["Python"], "certifications": null}
        ]"#;
        let roles = extract_roles(raw);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].title, "Backend Engineer");
        assert_eq!(roles[0].skills.as_deref(), Some(["Rust".to_string(), "SQL".to_string()].as_slice()));
        assert!(roles[1].certifications.is_none());
    }

    #[test]
    fn test_bare_strings_wrap_into_records() {
        let roles = extract_roles(r#"["DevOps Engineer", "SRE"]"#);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0], RoleSuggestion::bare("DevOps Engineer"));
        assert!(roles[1].skills.is_none());
    }

    #[test]
    fn test_title_alias_accepted() {
        let roles = extract_roles(r#"[{"title": "ML Engineer"}]"#);
        assert_eq!(roles[0].title, "ML Engineer");
    }

    #[test]
    fn test_array_embedded_in_prose() {
        let raw = "Based on your skills:\n[{\"job_title\": \"QA Engineer\"}]\nHope this helps.";
        assert_eq!(extract_roles(raw)[0].title, "QA Engineer");
    }

    #[test]
    fn test_hyphen_fallback() {
        let raw = "Suggested roles:\n- Frontend Developer\n- Full Stack Developer\nLet me know!";
        let roles = extract_roles(raw);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[1].title, "Full Stack Developer");
        assert!(roles[0].skills.is_none());
    }

    #[test]
    fn test_unparseable_elements_dropped() {
        let raw = r#"[{"job_title": "Cloud Architect"}, 42, {"skills": ["Go"]}]"#;
        let roles = extract_roles(raw);
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].title, "Cloud Architect");
    }

    #[test]
    fn test_garbage_yields_empty() {
        assert!(extract_roles("no roles to be found here").is_empty());
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let raw = r#"[
            {"job_title": "Backend Engineer", "skills": ["Rust"], "certifications": null},
            "Platform Engineer"
        ]"#;
        let first = extract_roles(raw);
        let serialized = serde_json::to_string(&first).unwrap();
        let second = extract_roles(&serialized);
        assert_eq!(first, second);
    }
}
