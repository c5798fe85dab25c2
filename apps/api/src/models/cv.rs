use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Snapshot of one CV generation run. Never updated, only re-created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedCvRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_posting_id: Option<Uuid>,
    pub template_name: String,
    pub content: String,
    pub ai_career_advice: Option<String>,
    pub created_at: DateTime<Utc>,
}
