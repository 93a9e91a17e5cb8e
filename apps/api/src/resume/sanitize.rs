//! Resume document sanitizer.
//!
//! Takes the raw nested record a user submits (personal info plus the
//! education, experience, projects and skills sections) and returns a cleaned
//! copy safe for storage and display: trimmed fields, collapsed
//! keyboard-smash runs, no empty fields or entries, no duplicate entries.
//! Idempotent — sanitizing an already-sanitized document changes nothing.

use std::collections::HashSet;

use serde_json::{Map, Value};

const SECTIONS: [Section; 4] = [
    Section::Education,
    Section::Experience,
    Section::Projects,
    Section::Skills,
];

#[derive(Debug, Clone, Copy)]
enum Section {
    Education,
    Experience,
    Projects,
    Skills,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Skills => "skills",
        }
    }

    /// Dedup key for an already-cleaned entry. Education entries are never
    /// deduplicated. Missing key fields participate as empty strings.
    fn dedup_key(self, entry: &Map<String, Value>) -> Option<(String, String)> {
        match self {
            Section::Education => None,
            Section::Experience => Some((field(entry, "company"), field(entry, "role"))),
            Section::Projects => Some((field(entry, "title"), String::new())),
            Section::Skills => Some((field(entry, "name").to_lowercase(), String::new())),
        }
    }
}

fn field(entry: &Map<String, Value>, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Sanitizes a raw resume document. Sections absent from the input stay
/// absent in the output; nothing here ever fails.
pub fn sanitize_resume(document: &Value) -> Value {
    let Some(doc) = document.as_object() else {
        return Value::Object(Map::new());
    };

    let mut out = Map::new();

    if let Some(personal) = doc.get("personal") {
        if let Some(cleaned) = sanitize_entry(personal) {
            out.insert("personal".to_string(), Value::Object(cleaned));
        }
    }

    for section in SECTIONS {
        if let Some(raw) = doc.get(section.name()) {
            out.insert(section.name().to_string(), sanitize_section(section, raw));
        }
    }

    Value::Object(out)
}

fn sanitize_section(section: Section, raw: &Value) -> Value {
    let mut entries = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    if let Some(list) = raw.as_array() {
        for entry in list {
            // Non-record entries are dropped, not errors
            let Some(cleaned) = sanitize_entry(entry) else {
                continue;
            };
            if let Some(key) = section.dedup_key(&cleaned) {
                // First occurrence wins; later duplicates dropped entirely
                if !seen.insert(key) {
                    continue;
                }
            }
            entries.push(Value::Object(cleaned));
        }
    }

    Value::Array(entries)
}

/// Cleans one record's fields. Returns `None` when nothing survives.
fn sanitize_entry(entry: &Value) -> Option<Map<String, Value>> {
    let record = entry.as_object()?;
    let mut cleaned = Map::new();

    for (key, value) in record {
        match value {
            Value::String(raw) => {
                let text = clean_text(raw, key == "summary");
                if !text.is_empty() {
                    cleaned.insert(key.clone(), Value::String(text));
                }
            }
            Value::Null => {}
            other => {
                cleaned.insert(key.clone(), other.clone());
            }
        }
    }

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Trims and collapses repeated-character runs in a scalar field.
///
/// The collapse is deliberately aggressive and can alter legitimate tokens;
/// the one carve-out is a summary field that reads like real prose (longer
/// than 10 characters, no run of 6+ repeats), which is preserved verbatim
/// after trimming, newlines included.
pub(crate) fn clean_text(raw: &str, is_summary: bool) -> String {
    let trimmed = raw.trim();
    if is_summary && trimmed.chars().count() > 10 && !has_repeat_run(trimmed, 6) {
        return trimmed.to_string();
    }
    collapse_repeats(trimmed)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Collapses any run of 3-or-more identical word characters down to 2.
fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if prev == Some(c) && is_word_char(c) {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            prev = Some(c);
            run = 1;
            out.push(c);
        }
    }

    out
}

/// True when `text` contains a run of at least `min` identical word characters.
fn has_repeat_run(text: &str, min: usize) -> bool {
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if prev == Some(c) && is_word_char(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run >= min {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapse_keyboard_smash() {
        assert_eq!(collapse_repeats("Hhhhhhhhhhh"), "Hhh");
        assert_eq!(collapse_repeats("aaaa"), "aa");
        assert_eq!(collapse_repeats("ab"), "ab");
    }

    #[test]
    fn test_collapse_leaves_double_letters() {
        assert_eq!(collapse_repeats("committee"), "committee");
        assert_eq!(collapse_repeats("Mississippi"), "Mississippi");
    }

    #[test]
    fn test_collapse_skips_punctuation_runs() {
        // Only word characters collapse; "..." is legitimate punctuation
        assert_eq!(collapse_repeats("wait..."), "wait...");
    }

    #[test]
    fn test_non_summary_field_collapsed() {
        let doc = json!({"personal": {"name": "Hhhhhhhhhhh"}});
        let cleaned = sanitize_resume(&doc);
        assert_eq!(cleaned["personal"]["name"], "Hhh");
    }

    #[test]
    fn test_summary_prose_preserved_verbatim() {
        let summary = "I led a team of five engineers to deliver X.";
        let doc = json!({"personal": {"summary": summary}});
        let cleaned = sanitize_resume(&doc);
        assert_eq!(cleaned["personal"]["summary"], summary);
    }

    #[test]
    fn test_summary_with_newlines_preserved() {
        let summary = "Backend engineer.\nBuilt billing systems.\nMentored juniors.";
        let doc = json!({"personal": {"summary": summary}});
        assert_eq!(sanitize_resume(&doc)["personal"]["summary"], summary);
    }

    #[test]
    fn test_short_summary_still_collapsed() {
        // The carve-out requires more than 10 characters
        let doc = json!({"personal": {"summary": "aaaaaa"}});
        assert_eq!(sanitize_resume(&doc)["personal"]["summary"], "aa");
    }

    #[test]
    fn test_smashed_summary_still_collapsed() {
        // A 6+ run disqualifies the prose carve-out
        let doc = json!({"personal": {"summary": "Greeeeeeeat engineer with experience"}});
        assert_eq!(
            sanitize_resume(&doc)["personal"]["summary"],
            "Greeat engineer with experience"
        );
    }

    #[test]
    fn test_fields_trimmed() {
        let doc = json!({"personal": {"name": "  Jane Doe  "}});
        assert_eq!(sanitize_resume(&doc)["personal"]["name"], "Jane Doe");
    }

    #[test]
    fn test_whitespace_only_fields_dropped() {
        let doc = json!({"education": [{"school": "MIT", "degree": "   "}]});
        let cleaned = sanitize_resume(&doc);
        let entry = &cleaned["education"][0];
        assert_eq!(entry["school"], "MIT");
        assert!(entry.get("degree").is_none());
    }

    #[test]
    fn test_empty_entries_dropped() {
        let doc = json!({"education": [
            {"school": "", "degree": "  "},
            {"school": "MIT"}
        ]});
        let cleaned = sanitize_resume(&doc);
        assert_eq!(cleaned["education"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_non_record_entries_dropped() {
        let doc = json!({"experience": ["just a string", 42, {"company": "Acme", "role": "Dev"}]});
        let cleaned = sanitize_resume(&doc);
        assert_eq!(cleaned["experience"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_experience_deduped_by_company_and_role() {
        let doc = json!({"experience": [
            {"company": "Acme", "role": "Dev", "description": "first stint"},
            {"company": "Acme", "role": "Dev", "description": "accidental duplicate"},
            {"company": "Acme", "role": "Lead"}
        ]});
        let cleaned = sanitize_resume(&doc);
        let entries = cleaned["experience"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        // First occurrence wins
        assert_eq!(entries[0]["description"], "first stint");
    }

    #[test]
    fn test_projects_deduped_by_title() {
        let doc = json!({"projects": [
            {"title": "Compiler", "tech": "Rust"},
            {"title": "Compiler", "tech": "C++"}
        ]});
        let cleaned = sanitize_resume(&doc);
        let entries = cleaned["projects"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["tech"], "Rust");
    }

    #[test]
    fn test_skills_deduped_case_insensitively() {
        let doc = json!({"skills": [
            {"name": "Python", "rating": 5},
            {"name": "python", "rating": 3},
            {"name": "SQL"}
        ]});
        let cleaned = sanitize_resume(&doc);
        let entries = cleaned["skills"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["name"], "Python");
    }

    #[test]
    fn test_education_not_deduped() {
        let doc = json!({"education": [
            {"school": "MIT", "degree": "BS"},
            {"school": "MIT", "degree": "BS"}
        ]});
        let cleaned = sanitize_resume(&doc);
        assert_eq!(cleaned["education"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_absent_sections_stay_absent() {
        let doc = json!({"personal": {"name": "Jane"}});
        let cleaned = sanitize_resume(&doc);
        assert!(cleaned.get("education").is_none());
        assert!(cleaned.get("skills").is_none());
    }

    #[test]
    fn test_null_fields_dropped() {
        let doc = json!({"skills": [{"name": "Rust", "category": null}]});
        let cleaned = sanitize_resume(&doc);
        assert!(cleaned["skills"][0].get("category").is_none());
    }

    #[test]
    fn test_non_string_scalars_kept() {
        let doc = json!({"skills": [{"name": "Rust", "rating": 4}]});
        assert_eq!(sanitize_resume(&doc)["skills"][0]["rating"], 4);
    }

    #[test]
    fn test_non_object_document_yields_empty() {
        assert_eq!(sanitize_resume(&json!("nonsense")), json!({}));
    }

    #[test]
    fn test_idempotent() {
        let doc = json!({
            "personal": {
                "name": "  Jane Doe ",
                "summary": "I led a team of five engineers to deliver X."
            },
            "education": [{"school": "MIT", "degree": "   "}],
            "experience": [
                {"company": "Acme", "role": "Dev"},
                {"company": "Acme", "role": "Dev"},
                "garbage"
            ],
            "projects": [{"title": "Compilerrrrr"}],
            "skills": [{"name": "SQL"}, {"name": "sql"}]
        });
        let once = sanitize_resume(&doc);
        let twice = sanitize_resume(&once);
        assert_eq!(once, twice);
    }
}
