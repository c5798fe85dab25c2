use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Stored as submitted and never serialized back to clients.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub experience_years: Option<i32>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
