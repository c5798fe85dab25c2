//! Axum route handlers for the CV Generator API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::ExtractUser;
use crate::generation::generator::{career_advice, generate_cv, GeneratedCv};
use crate::generation::translation::translate_cv;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateQuery {
    pub lang: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceQuery {
    #[serde(default)]
    pub title: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/cv-generator/create?job_id=
///
/// Tailors the caller's CV to a posting (the newest one when `job_id` is absent),
/// stores it and returns every generated section.
pub async fn handle_create_cv(
    State(state): State<AppState>,
    ExtractUser(user_id): ExtractUser,
    Query(query): Query<CreateQuery>,
) -> Result<Json<GeneratedCv>, AppError> {
    Ok(Json(generate_cv(&state.db, &state.gateway, user_id, query.job_id).await?))
}

/// POST /api/cv-generator/translate?lang=
pub async fn handle_translate_cv(
    State(state): State<AppState>,
    Query(query): Query<TranslateQuery>,
    Json(cv): Json<Value>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(translate_cv(&state.gateway, &cv, &query.lang).await?))
}

/// GET /api/cv-generator/career-advice?title=
///
/// Plain-text advice; AI outages produce a fixed message, never an error.
pub async fn handle_career_advice(
    State(state): State<AppState>,
    Query(query): Query<AdviceQuery>,
) -> String {
    career_advice(&state.gateway, &query.title).await
}
