use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked skill. Rating is 1-5 when present.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub rating: Option<i16>,
}
