//! Axum route handlers for the Resume API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::ai_client::{prompts::HELPFUL_ASSISTANT_SYSTEM, ChatMessage, CompletionParams};
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::prompts;
use crate::resume::sanitize::sanitize_resume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub user_id: Uuid,
    /// Raw nested resume record as submitted; sanitized before storage.
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub feedback: String,
}

/// POST /api/v1/resumes
///
/// Sanitizes the submitted document and stores the cleaned copy. Malformed
/// entries are dropped by the sanitizer rather than rejected here.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(request): Json<SaveResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let cleaned = sanitize_resume(&request.data);

    let row: ResumeRow = sqlx::query_as(
        "INSERT INTO resumes (user_id, data) VALUES ($1, $2) RETURNING *",
    )
    .bind(request.user_id)
    .bind(&cleaned)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let rows: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows))
}

/// POST /api/v1/resumes/analyze
///
/// Free-text resume feedback from the provider, passed through as-is.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let messages = [
        ChatMessage::system(HELPFUL_ASSISTANT_SYSTEM),
        ChatMessage::user(prompts::analyze_prompt(&request.text)),
    ];

    let feedback = state
        .ai
        .complete(&messages, CompletionParams::default())
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    Ok(Json(AnalyzeResumeResponse { feedback }))
}
