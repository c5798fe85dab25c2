pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{chat, generation, jobs, matching, profile, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Accounts and profile
        .route("/api/auth/register", post(users::handlers::handle_register))
        .route("/api/auth/login", post(users::handlers::handle_login))
        .route(
            "/api/profile/me",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_update_profile),
        )
        // Job postings
        .route("/api/job/analyze-by-url", post(jobs::handlers::handle_analyze_by_url))
        .route("/api/job/analyze-text", post(jobs::handlers::handle_analyze_text))
        .route("/api/job/user/:user_id", get(jobs::handlers::handle_list_for_user))
        .route("/api/job/:id", get(jobs::handlers::handle_get_job))
        // Matching and market analysis
        .route("/api/analysis/job-match", post(matching::handlers::handle_job_match))
        .route("/api/market/analyze", post(matching::handlers::handle_market_analyze))
        .route(
            "/api/analysis/market-analysis/:user_id",
            get(matching::handlers::handle_market_by_user),
        )
        // CV generation
        .route("/api/cv-generator/create", post(generation::handlers::handle_create_cv))
        .route("/api/cv-generator/translate", post(generation::handlers::handle_translate_cv))
        .route(
            "/api/cv-generator/career-advice",
            get(generation::handlers::handle_career_advice),
        )
        // Chat
        .route("/api/chatbot/message", post(chat::handlers::handle_send_message))
        .route(
            "/api/chatbot/history",
            get(chat::handlers::handle_history).delete(chat::handlers::handle_clear_history),
        )
        .with_state(state)
}
