//! Axum route handlers for role matching and application tracking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai_client::{prompts::HELPFUL_ASSISTANT_SYSTEM, ChatMessage, CompletionParams};
use crate::errors::AppError;
use crate::jobs::prompts;
use crate::models::jobs::{JobApplicationRow, JobMatchHistoryRow};
use crate::normalize::{extract_roles, RoleSuggestion};
use crate::state::AppState;

const DEFAULT_APPLICATION_STATUS: &str = "applied";

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Role matching
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRolesRequest {
    pub user_id: Uuid,
    /// Skills or resume content to match against.
    pub input_text: String,
}

#[derive(Debug, Serialize)]
pub struct MatchRolesResponse {
    pub roles: Vec<RoleSuggestion>,
}

/// POST /api/v1/jobs/match
///
/// Asks the provider for 5-7 role suggestions and normalizes whatever comes
/// back. The run is recorded in match history either way.
pub async fn handle_match_roles(
    State(state): State<AppState>,
    Json(request): Json<MatchRolesRequest>,
) -> Result<Json<MatchRolesResponse>, AppError> {
    if request.input_text.trim().is_empty() {
        return Err(AppError::Validation("input_text cannot be empty".to_string()));
    }

    let messages = [
        ChatMessage::system(HELPFUL_ASSISTANT_SYSTEM),
        ChatMessage::user(prompts::match_roles_prompt(&request.input_text)),
    ];

    let content = state
        .ai
        .complete(&messages, CompletionParams::default())
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    let roles = extract_roles(&content);

    sqlx::query(
        "INSERT INTO job_match_history (user_id, input_text, matched_roles) VALUES ($1, $2, $3)",
    )
    .bind(request.user_id)
    .bind(&request.input_text)
    .bind(serde_json::to_value(&roles).map_err(anyhow::Error::from)?)
    .execute(&state.db)
    .await?;

    Ok(Json(MatchRolesResponse { roles }))
}

/// GET /api/v1/jobs/match/history
pub async fn handle_match_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<JobMatchHistoryRow>>, AppError> {
    let rows: Vec<JobMatchHistoryRow> = sqlx::query_as(
        "SELECT * FROM job_match_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

// ────────────────────────────────────────────────────────────────────────────
// Application tracking
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub user_id: Uuid,
    pub company: String,
    pub role: String,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateApplicationRequest {
    pub user_id: Uuid,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    let rows: Vec<JobApplicationRow> = sqlx::query_as(
        "SELECT * FROM job_applications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    let company = request.company.trim();
    let role = request.role.trim();
    if company.is_empty() || role.is_empty() {
        return Err(AppError::Validation(
            "company and role cannot be empty".to_string(),
        ));
    }

    let status = request
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_APPLICATION_STATUS);

    let row: JobApplicationRow = sqlx::query_as(
        "INSERT INTO job_applications (user_id, company, role, status, notes) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(request.user_id)
    .bind(company)
    .bind(role)
    .bind(status)
    .bind(&request.notes)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<JobApplicationRow>, AppError> {
    let existing: Option<JobApplicationRow> =
        sqlx::query_as("SELECT * FROM job_applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(request.user_id)
            .fetch_optional(&state.db)
            .await?;

    let existing = existing.ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let status = request
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&existing.status)
        .to_string();
    let notes = request.notes.or(existing.notes);

    let row: JobApplicationRow = sqlx::query_as(
        "UPDATE job_applications SET status = $1, notes = $2 \
         WHERE id = $3 AND user_id = $4 RETURNING *",
    )
    .bind(status)
    .bind(notes)
    .bind(id)
    .bind(request.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
