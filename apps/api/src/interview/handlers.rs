//! Axum route handlers for the Interview API.

use axum::{
    extract::{Query, State},
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::ai_client::{ChatMessage, CompletionParams};
use crate::errors::AppError;
use crate::interview::prompts;
use crate::models::interview::InterviewFeedbackRow;
use crate::normalize::{extract_evaluation, extract_questions, AnswerEvaluation};
use crate::state::AppState;

/// Questions generated per session, chosen at random within this range.
const MIN_QUESTIONS: usize = 3;
const MAX_QUESTIONS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    /// Resume text, job description, or a skill list.
    pub input_text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub user_id: Uuid,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub feedback_id: Uuid,
    pub evaluations: Vec<AnswerEvaluation>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/interview/questions
///
/// Generates 3-5 interview questions from the supplied profile text. The
/// provider output goes through the normalizer, so the list always renders
/// even when the payload is malformed.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    if request.input_text.trim().is_empty() {
        return Err(AppError::Validation("input_text cannot be empty".to_string()));
    }

    let target = rand::thread_rng().gen_range(MIN_QUESTIONS..=MAX_QUESTIONS);
    let messages = [
        ChatMessage::system(prompts::QUESTION_SYSTEM),
        ChatMessage::user(prompts::question_prompt(&request.input_text, target)),
    ];

    let content = state
        .ai
        .complete(
            &messages,
            CompletionParams {
                temperature: 0.8,
                max_tokens: 1024,
                provider: None,
            },
        )
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    Ok(Json(GenerateQuestionsResponse {
        questions: extract_questions(&content, target),
    }))
}

/// POST /api/v1/interview/evaluate
///
/// Evaluates each question/answer pair with one completion call apiece.
/// A provider failure on one pair degrades that pair to an Error-verdict
/// evaluation; it never fails the batch. The full set is persisted.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if request.questions.is_empty() {
        return Err(AppError::Validation("questions cannot be empty".to_string()));
    }
    if request.questions.len() != request.answers.len() {
        return Err(AppError::Validation(
            "questions and answers must have the same length".to_string(),
        ));
    }

    let mut evaluations = Vec::with_capacity(request.questions.len());

    for (question, answer) in request.questions.iter().zip(request.answers.iter()) {
        let messages = [
            ChatMessage::system(prompts::EVALUATION_SYSTEM),
            ChatMessage::user(prompts::evaluation_prompt(question, answer)),
        ];

        let evaluation = match state.ai.complete(&messages, CompletionParams::default()).await {
            Ok(content) => AnswerEvaluation::from_fragment(
                question.clone(),
                answer.clone(),
                extract_evaluation(&content),
            ),
            Err(e) => {
                error!("Evaluation call failed for one pair: {e}");
                AnswerEvaluation::service_unavailable(question.clone(), answer.clone())
            }
        };
        evaluations.push(evaluation);
    }

    let row: InterviewFeedbackRow = sqlx::query_as(
        "INSERT INTO interview_feedback (user_id, questions, feedback) \
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(request.user_id)
    .bind(serde_json::to_value(&request.questions).map_err(anyhow::Error::from)?)
    .bind(serde_json::to_value(&evaluations).map_err(anyhow::Error::from)?)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(EvaluateResponse {
        feedback_id: row.id,
        evaluations,
    }))
}

/// GET /api/v1/interview/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<InterviewFeedbackRow>>, AppError> {
    let rows: Vec<InterviewFeedbackRow> = sqlx::query_as(
        "SELECT * FROM interview_feedback WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}
