use crate::ai_client::prompts::JSON_ONLY_INSTRUCTION;

pub const QUESTION_SYSTEM: &str = "You are a helpful assistant that generates interview questions.";

pub const EVALUATION_SYSTEM: &str = "You are an AI assistant.";

pub fn question_prompt(input_text: &str, count: usize) -> String {
    format!(
        r#"You are an expert interviewer. Given the following user profile (resume, job description, or skills),
generate exactly {count} relevant interview questions.

Include a mix of:
1. Technical questions specific to the skills mentioned
2. Behavioral questions
3. Situational questions
4. Problem-solving scenarios

Format the response as a JSON array of strings. Example:
["Question 1?", "Question 2?", ...]

User Input:
{input_text}"#
    )
}

pub fn evaluation_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"You are an AI interview coach.

Evaluate the following interview question and answer:

Question: {question}
Answer: {answer}

Your task:
1. Tell whether the answer is correct, partially correct, or incorrect.
2. Explain why.
3. Suggest **specific improvements**, even for correct answers.
4. If the answer is weak or incorrect, provide a **model answer**.

{JSON_ONLY_INSTRUCTION}

Respond in this exact JSON format:
{{
  "verdict": "Correct",
  "feedback": "Your feedback here",
  "model_answer": "Model answer here if needed"
}}"#
    )
}
