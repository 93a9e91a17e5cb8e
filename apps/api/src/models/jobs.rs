use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked job application.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub role: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One role-matching run: the input the user supplied and the normalized
/// suggestions the provider returned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobMatchHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub matched_roles: Value,
    pub created_at: DateTime<Utc>,
}
