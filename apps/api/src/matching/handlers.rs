//! Axum route handlers for job matching and market analysis.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::market::{analyze_market, MarketReport, DEFAULT_AREA};
use crate::matching::parser::{parse_posting, JobRequirements};
use crate::matching::scoring::{score_match, MatchReport};
use crate::profile::store::load_profile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobMatchRequest {
    pub user_id: Uuid,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct JobMatchResponse {
    #[serde(flatten)]
    pub report: MatchReport,
    pub job: JobRequirements,
}

#[derive(Debug, Deserialize)]
pub struct MarketRequest {
    pub user_id: Uuid,
    pub area: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    pub area: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analysis/job-match
///
/// Scores the user's profile against a pasted posting using the keyword table.
/// No AI call is made.
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<JobMatchResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description cannot be empty".to_string()));
    }

    let profile = load_profile(&state.db, request.user_id).await?;
    let job = parse_posting(&request.job_description, &state.skills);
    let report = score_match(&profile, &job, &state.skills);
    info!(
        user_id = %request.user_id,
        percentage = report.match_percentage,
        level = %report.match_level,
        "job match scored"
    );

    Ok(Json(JobMatchResponse { report, job }))
}

/// POST /api/market/analyze
///
/// A blank or missing area is derived from the profile.
pub async fn handle_market_analyze(
    State(state): State<AppState>,
    Json(request): Json<MarketRequest>,
) -> Result<Json<MarketReport>, AppError> {
    let report = analyze_market(
        &state.db,
        &state.gateway,
        request.user_id,
        request.area.as_deref(),
    )
    .await?;
    Ok(Json(report))
}

/// GET /api/analysis/market-analysis/:user_id?area=
pub async fn handle_market_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<AreaQuery>,
) -> Result<Json<MarketReport>, AppError> {
    let area = query
        .area
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AREA.to_string());
    let report = analyze_market(&state.db, &state.gateway, user_id, Some(&area)).await?;
    Ok(Json(report))
}
