use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting captured at analysis time. Immutable after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub url: String,
    pub raw_text: Option<String>,
    pub cleaned_text: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub work_type: Option<String>,
    pub experience_level: Option<String>,
    /// Comma-separated skill list.
    pub required_skills: Option<String>,
    /// Semicolon-separated responsibility list.
    pub responsibilities: Option<String>,
    pub analysis_report: Option<String>,
    pub created_at: DateTime<Utc>,
}
