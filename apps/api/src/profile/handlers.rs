//! Axum route handlers for the Profile API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extract::ExtractUser;
use crate::models::profile::Profile;
use crate::profile::store::{load_profile, replace_profile, ProfileUpdate};
use crate::state::AppState;

/// GET /api/profile/me
pub async fn handle_get_profile(
    State(state): State<AppState>,
    ExtractUser(user_id): ExtractUser,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(load_profile(&state.db, user_id).await?))
}

/// PUT /api/profile/me
///
/// Replaces the whole profile; child lists left out of the body are cleared.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    ExtractUser(user_id): ExtractUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(replace_profile(&state.db, user_id, &update).await?))
}
