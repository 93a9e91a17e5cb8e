pub fn analyze_prompt(resume_text: &str) -> String {
    format!(
        "You are a resume expert. Analyze the following resume text and suggest improvements, \
         missing keywords, and any weaknesses. Return your feedback as a bullet list.\n\nResume:\n{resume_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_prompt_embeds_resume() {
        let prompt = analyze_prompt("Jane Doe, backend engineer");
        assert!(prompt.contains("Jane Doe, backend engineer"));
        assert!(prompt.contains("bullet list"));
    }
}
