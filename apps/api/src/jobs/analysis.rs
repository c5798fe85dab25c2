//! Posting analysis pipeline: three AI passes, merge, skill coverage, persistence.

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::prompts::{
    DETAILED_EXTRACTION_PROMPT, RECRUITER_REPORT_PROMPT, UNIVERSAL_EXTRACTION_PROMPT,
};
use crate::jobs::store::{self, NewJobPosting};
use crate::llm_client::{parse_json_lenient, ProviderGateway};
use crate::matching::market::user_covers;
use crate::matching::merge::{merge_extractions, MergedPosting, PostingExtraction};
use crate::models::profile::Profile;
use crate::profile::context::analysis_context;
use crate::profile::store::load_profile;
use crate::text::truncate_with_ellipsis;

pub const CONTENT_UNAVAILABLE: &str = "İçerik çekilemedi.";
pub const MANUAL_ENTRY_URL: &str = "Manuel Giriş";
const REPORT_UNAVAILABLE: &str = "Analiz servisine şu anda ulaşılamıyor.";

/// Shorter content is treated as a failed extraction.
const MIN_CONTENT_LEN: usize = 50;
const MAX_TEXT_LEN: usize = 4000;
const MAX_LIST_LEN: usize = 2000;

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobAnalysis {
    pub job_id: Option<Uuid>,
    pub position: String,
    pub company: String,
    pub location: String,
    pub work_type: String,
    pub experience_level: String,
    pub education_level: String,
    pub military_status: String,
    pub salary: String,
    pub summary: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_score: u32,
    /// Recruiter report, or the extraction failure notice.
    pub formatted_analysis: String,
    pub responsibilities: Vec<String>,
}

impl JobAnalysis {
    fn unavailable() -> Self {
        Self {
            formatted_analysis: CONTENT_UNAVAILABLE.to_string(),
            ..Self::default()
        }
    }
}

/// AI output for one posting, before persistence.
#[derive(Debug, Clone)]
pub struct AnalyzedPosting {
    pub merged: MergedPosting,
    pub report: String,
}

/// Splits job skills into covered and uncovered, with `round(matched × 100 / total)`.
pub fn skill_coverage(user_skills: &[String], job_skills: &[String]) -> (Vec<String>, Vec<String>, u32) {
    let (matched, missing): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .cloned()
        .partition(|skill| user_covers(user_skills, skill));
    let score = if job_skills.is_empty() {
        0
    } else {
        (matched.len() as f64 * 100.0 / job_skills.len() as f64).round() as u32
    };
    (matched, missing, score)
}

async fn extract(gateway: &ProviderGateway, template: &str, content: &str, purpose: &str) -> PostingExtraction {
    let prompt = template.replace("{text}", content);
    let Some(text) = gateway.try_complete(&prompt, purpose).await else {
        return PostingExtraction::default();
    };
    match parse_json_lenient::<Value>(&text) {
        Ok(root) => PostingExtraction::from_json(&root),
        Err(e) => {
            warn!(purpose, error = %e, "extraction reply is not JSON, using defaults");
            PostingExtraction::default()
        }
    }
}

/// Runs the three AI passes concurrently. `None` when the content is too short to analyze;
/// no provider is contacted in that case.
pub async fn analyze_posting(
    gateway: &ProviderGateway,
    profile: &Profile,
    content: &str,
) -> Option<AnalyzedPosting> {
    if content.trim().chars().count() < MIN_CONTENT_LEN {
        warn!(len = content.len(), "posting content too short, skipping analysis");
        return None;
    }

    let report_prompt = RECRUITER_REPORT_PROMPT
        .replace("{profile}", &analysis_context(profile))
        .replace("{posting}", content.trim());

    let (detailed, report, universal) = tokio::join!(
        extract(gateway, DETAILED_EXTRACTION_PROMPT, content, "job_detailed"),
        gateway.try_complete(&report_prompt, "job_report"),
        extract(gateway, UNIVERSAL_EXTRACTION_PROMPT, content, "job_universal"),
    );

    Some(AnalyzedPosting {
        merged: merge_extractions(&universal, &detailed),
        report: report.unwrap_or_else(|| REPORT_UNAVAILABLE.to_string()),
    })
}

/// Full pipeline for one posting. `url` is the source page or `MANUAL_ENTRY_URL`.
pub async fn analyze_and_store(
    pool: &PgPool,
    gateway: &ProviderGateway,
    user_id: Uuid,
    content: &str,
    url: &str,
) -> Result<JobAnalysis, AppError> {
    let profile = load_profile(pool, user_id).await?;
    let Some(analyzed) = analyze_posting(gateway, &profile, content).await else {
        return Ok(JobAnalysis::unavailable());
    };
    let AnalyzedPosting { merged, report } = analyzed;

    let (matched, missing, score) = skill_coverage(&profile.skill_names(), &merged.technical_skills);

    let row = store::insert_posting(
        pool,
        user_id,
        &NewJobPosting {
            url: url.to_string(),
            raw_text: content.to_string(),
            cleaned_text: truncate_with_ellipsis(content, MAX_TEXT_LEN),
            position: merged.position.clone(),
            company: merged.company.clone(),
            location: merged.location.clone(),
            work_type: merged.work_type.clone(),
            experience_level: merged.experience_level.clone(),
            required_skills: truncate_with_ellipsis(&merged.technical_skills.join(", "), MAX_LIST_LEN),
            responsibilities: truncate_with_ellipsis(&merged.responsibilities.join("; "), MAX_LIST_LEN),
            analysis_report: truncate_with_ellipsis(&report, MAX_TEXT_LEN),
        },
    )
    .await?;
    info!(%user_id, job_id = %row.id, score, "job posting analyzed and stored");

    Ok(JobAnalysis {
        job_id: Some(row.id),
        position: merged.position,
        company: merged.company,
        location: merged.location,
        work_type: merged.work_type,
        experience_level: merged.experience_level,
        education_level: merged.education_level,
        military_status: merged.military_status,
        salary: merged.salary,
        summary: merged.summary,
        matched_skills: matched,
        missing_skills: missing,
        match_score: score,
        formatted_analysis: report,
        responsibilities: merged.responsibilities,
    })
}
