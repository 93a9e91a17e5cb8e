pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(resume::handle_save_resume))
        .route("/api/v1/resumes", get(resume::handle_list_resumes))
        .route("/api/v1/resumes/analyze", post(resume::handle_analyze_resume))
        // Interview API
        .route(
            "/api/v1/interview/questions",
            post(interview::handle_generate_questions),
        )
        .route("/api/v1/interview/evaluate", post(interview::handle_evaluate))
        .route("/api/v1/interview/history", get(interview::handle_history))
        // Jobs API
        .route("/api/v1/jobs/match", post(jobs::handle_match_roles))
        .route("/api/v1/jobs/match/history", get(jobs::handle_match_history))
        .route("/api/v1/applications", get(jobs::handle_list_applications))
        .route("/api/v1/applications", post(jobs::handle_create_application))
        .route(
            "/api/v1/applications/:id",
            patch(jobs::handle_update_application),
        )
        .route(
            "/api/v1/applications/:id",
            delete(jobs::handle_delete_application),
        )
        // Skills API
        .route("/api/v1/skills", get(skills::handle_list_skills))
        .route("/api/v1/skills", post(skills::handle_create_skill))
        .route("/api/v1/skills/:id", patch(skills::handle_update_skill))
        .route("/api/v1/skills/:id", delete(skills::handle_delete_skill))
        .with_state(state)
}
