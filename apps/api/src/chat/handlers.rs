//! Axum route handlers for the Chatbot API.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::chat::service::{clear_history, history, send_message, ChatReply};
use crate::errors::AppError;
use crate::extract::ExtractUser;
use crate::models::chat::ChatMessageRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub message: String,
}

/// POST /api/chatbot/message
///
/// The body's `user_id` wins over the `X-User-ID` header.
pub async fn handle_send_message(
    State(state): State<AppState>,
    header_user: Option<ExtractUser>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let user_id = request
        .user_id
        .or(header_user.map(|ExtractUser(id)| id))
        .ok_or_else(|| AppError::Validation("Kullanıcı kimliği bulunamadı.".to_string()))?;
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Mesaj boş olamaz.".to_string()));
    }

    let reply = send_message(&state.db, &state.gateway, user_id, &request.message).await?;
    Ok(Json(reply))
}

/// GET /api/chatbot/history
pub async fn handle_history(
    State(state): State<AppState>,
    ExtractUser(user_id): ExtractUser,
) -> Result<Json<Vec<ChatMessageRow>>, AppError> {
    Ok(Json(history(&state.db, user_id).await?))
}

/// DELETE /api/chatbot/history
pub async fn handle_clear_history(
    State(state): State<AppState>,
    ExtractUser(user_id): ExtractUser,
) -> Result<StatusCode, AppError> {
    clear_history(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
