use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored interview session: the questions asked and the per-answer
/// evaluations, both kept as JSON payloads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewFeedbackRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub questions: Value,
    pub feedback: Value,
    pub created_at: DateTime<Utc>,
}
