pub fn match_roles_prompt(input_text: &str) -> String {
    format!(
        r#"Based on the following skills or resume content, suggest 5-7 relevant job roles.
For each job role, return the response in the following JSON format:

[
  {{
    "job_title": "Job Title",
    "skills": ["Skill1", "Skill2", "Skill3"],
    "certifications": ["Cert1", "Cert2"]
  }},
  ...
]

Only return a valid JSON array. Do not include explanations or extra text.

Input:
{input_text}"#
    )
}
