//! Axum route handlers for the Job API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::analysis::{analyze_and_store, JobAnalysis, MANUAL_ENTRY_URL};
use crate::jobs::store;
use crate::models::job::JobPostingRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    pub user_id: Uuid,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub user_id: Uuid,
    pub job_text: String,
}

/// POST /api/job/analyze-by-url
///
/// A page that cannot be fetched is reported like one without usable content.
pub async fn handle_analyze_by_url(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeUrlRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let content = match state.scraper.fetch(url).await {
        Ok(page) => page.content().to_string(),
        Err(e) => {
            warn!(url, error = %e, "job page could not be fetched");
            String::new()
        }
    };

    let analysis = analyze_and_store(&state.db, &state.gateway, request.user_id, &content, url).await?;
    Ok(Json(analysis))
}

/// POST /api/job/analyze-text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    let analysis = analyze_and_store(
        &state.db,
        &state.gateway,
        request.user_id,
        &request.job_text,
        MANUAL_ENTRY_URL,
    )
    .await?;
    Ok(Json(analysis))
}

/// GET /api/job/user/:user_id
///
/// Newest first; 204 when the user has no postings.
pub async fn handle_list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let postings = store::list_for_user(&state.db, user_id).await?;
    if postings.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(postings).into_response())
}

/// GET /api/job/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobPostingRow>, AppError> {
    let posting = store::find_by_id(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("İş ilanı bulunamadı: {job_id}")))?;
    Ok(Json(posting))
}
