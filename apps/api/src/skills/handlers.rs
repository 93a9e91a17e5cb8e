//! Axum route handlers for the Skills API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::skill::SkillRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub rating: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkillRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub category: Option<String>,
    pub rating: Option<i16>,
}

fn validate_rating(rating: Option<i16>) -> Result<(), AppError> {
    if let Some(r) = rating {
        if !(1..=5).contains(&r) {
            return Err(AppError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }
    }
    Ok(())
}

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    let rows: Vec<SkillRow> =
        sqlx::query_as("SELECT * FROM skills WHERE user_id = $1 ORDER BY name")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rows))
}

/// POST /api/v1/skills
pub async fn handle_create_skill(
    State(state): State<AppState>,
    Json(request): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<SkillRow>), AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    validate_rating(request.rating)?;

    let row: SkillRow = sqlx::query_as(
        "INSERT INTO skills (user_id, name, category, rating) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(request.user_id)
    .bind(name)
    .bind(
        request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty()),
    )
    .bind(request.rating)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSkillRequest>,
) -> Result<Json<SkillRow>, AppError> {
    validate_rating(request.rating)?;

    let existing: Option<SkillRow> =
        sqlx::query_as("SELECT * FROM skills WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(request.user_id)
            .fetch_optional(&state.db)
            .await?;

    let existing = existing.ok_or_else(|| AppError::NotFound(format!("Skill {id} not found")))?;

    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&existing.name)
        .to_string();
    let category = request.category.or(existing.category);
    let rating = request.rating.or(existing.rating);

    let row: SkillRow = sqlx::query_as(
        "UPDATE skills SET name = $1, category = $2, rating = $3 \
         WHERE id = $4 AND user_id = $5 RETURNING *",
    )
    .bind(name)
    .bind(category)
    .bind(rating)
    .bind(id)
    .bind(request.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// DELETE /api/v1/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Skill {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}
