//! Request extractors.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::AppError;

const X_USER_ID: &str = "X-User-ID";

/// The caller's user id from the `X-User-ID` header.
#[derive(Debug, Clone, Copy)]
pub struct ExtractUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(X_USER_ID)
            .ok_or_else(|| AppError::Validation("`X-User-ID` header is missing".to_string()))?;
        let user_id = header
            .to_str()
            .ok()
            .and_then(|v| Uuid::from_str(v.trim()).ok())
            .ok_or_else(|| AppError::Validation("invalid user id".to_string()))?;
        Ok(ExtractUser(user_id))
    }
}
