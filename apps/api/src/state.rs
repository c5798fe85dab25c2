use std::sync::Arc;

use sqlx::PgPool;

use crate::jobs::scraper::JobScraper;
use crate::llm_client::ProviderGateway;
use crate::matching::skills::SkillTable;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Gemini → Groq → DeepSeek fallback chain.
    pub gateway: ProviderGateway,
    /// Read-only skill catalogue, loaded once at startup.
    pub skills: Arc<SkillTable>,
    pub scraper: Arc<dyn JobScraper>,
}
