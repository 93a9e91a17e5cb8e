use sqlx::PgPool;

use crate::ai_client::AiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub ai: AiClient,
}
