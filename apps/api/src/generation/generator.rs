//! CV generation: orchestrates the full pipeline.
//!
//! Flow: load profile → resolve target posting → prioritize skills →
//!       summaries, item descriptions and career advice (concurrently) →
//!       assemble ATS text → persist to DB → return response.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::assembler::{render_ats_content, CvBody, CvHeader};
use crate::generation::descriptions::{
    copy_certificates, copy_languages, optimize_education, optimize_experiences, optimize_projects,
    OptimizedCertificate, OptimizedEducation, OptimizedItem, OptimizedLanguage,
};
use crate::generation::prompts::CAREER_ADVICE_PROMPT;
use crate::generation::summaries::tailored_summaries;
use crate::jobs::store;
use crate::llm_client::ProviderGateway;
use crate::models::cv::GeneratedCvRow;
use crate::models::job::JobPostingRow;
use crate::models::profile::Profile;
use crate::profile::store::load_profile;
use crate::text::{safe, split_list, tr_lowercase};

pub const TEMPLATE_NAME: &str = "ATS_SMART_FULL_V3";
const GENERAL_APPLICATION: &str = "Genel Başvuru";
const ADVICE_NO_TARGET: &str = "Tavsiye oluşturulamadı.";
const ADVICE_UNAVAILABLE: &str = "Kariyer tavsiyesi şu an oluşturulamıyor.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The posting a CV is tailored to.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTarget {
    /// `None` for the placeholder used when a requested posting does not exist.
    pub id: Option<Uuid>,
    pub position: String,
    /// Comma-separated, as stored.
    pub required_skills: String,
    pub responsibilities: String,
}

impl JobTarget {
    pub fn general_application() -> Self {
        Self {
            id: None,
            position: GENERAL_APPLICATION.to_string(),
            required_skills: String::new(),
            responsibilities: String::new(),
        }
    }

    pub fn from_row(row: &JobPostingRow) -> Self {
        Self {
            id: Some(row.id),
            position: safe(row.position.as_deref()),
            required_skills: safe(row.required_skills.as_deref()),
            responsibilities: safe(row.responsibilities.as_deref()),
        }
    }
}

/// Generated CV before persistence.
#[derive(Debug, Clone, Serialize)]
pub struct CvDraft {
    pub tailored_summary: String,
    pub tailored_summaries: Vec<String>,
    pub ai_career_advice: String,
    pub prioritized_skills: Vec<String>,
    pub optimized_experiences: Vec<OptimizedItem>,
    pub optimized_projects: Vec<OptimizedItem>,
    pub optimized_languages: Vec<OptimizedLanguage>,
    pub optimized_certificates: Vec<OptimizedCertificate>,
    pub optimized_education: Vec<OptimizedEducation>,
    /// The assembled ATS document.
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCv {
    pub cv_id: Uuid,
    pub template_name: String,
    #[serde(flatten)]
    pub draft: CvDraft,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline steps
// ────────────────────────────────────────────────────────────────────────────

/// Explicit id → that posting, or the placeholder when it is gone.
/// No id → the user's newest posting, if any.
pub async fn resolve_job(pool: &PgPool, user_id: Uuid, job_id: Option<Uuid>) -> Result<Option<JobTarget>, AppError> {
    match job_id {
        Some(id) => Ok(Some(match store::find_by_id(pool, id).await? {
            Some(row) => JobTarget::from_row(&row),
            None => {
                warn!(%id, "requested posting not found, generating a general application");
                JobTarget::general_application()
            }
        })),
        None => Ok(store::latest_for_user(pool, user_id)
            .await?
            .as_ref()
            .map(JobTarget::from_row)),
    }
}

/// Posting block handed to the summary prompt.
pub fn job_context(job: Option<&JobTarget>) -> String {
    let (position, skills, responsibilities) = match job {
        Some(j) => (j.position.as_str(), j.required_skills.as_str(), j.responsibilities.as_str()),
        None => (GENERAL_APPLICATION, "", ""),
    };
    format!("Pozisyon: {position}\nBeceriler: {skills}\nSorumluluklar: {responsibilities}")
}

/// Profile skills that contain any job keyword come first; order is otherwise kept.
pub fn prioritize_skills(user_skills: &[String], job_skills: &str) -> Vec<String> {
    let keywords: Vec<String> = split_list(job_skills).iter().map(|k| tr_lowercase(k)).collect();
    if keywords.is_empty() {
        return user_skills.to_vec();
    }
    let (mut first, rest): (Vec<String>, Vec<String>) = user_skills.iter().cloned().partition(|skill| {
        let lower = tr_lowercase(skill);
        keywords.iter().any(|k| lower.contains(k.as_str()))
    });
    first.extend(rest);
    first
}

/// Bullet-point career advice for `target`.
pub async fn career_advice(gateway: &ProviderGateway, target: &str) -> String {
    let target = target.trim();
    if target.is_empty() {
        return ADVICE_NO_TARGET.to_string();
    }
    let prompt = CAREER_ADVICE_PROMPT.replace("{title}", target);
    match gateway.try_complete(&prompt, "career_advice").await {
        Some(advice) => advice.trim().to_string(),
        None => ADVICE_UNAVAILABLE.to_string(),
    }
}

/// Every AI and formatting step, without touching the database.
pub async fn build_cv_draft(gateway: &ProviderGateway, profile: &Profile, job: Option<&JobTarget>) -> CvDraft {
    let job_skills = job.map(|j| j.required_skills.as_str()).unwrap_or_default();
    let context = job_context(job);
    let prioritized_skills = prioritize_skills(&profile.skill_names(), job_skills);
    let advice_target = job
        .map(|j| j.position.clone())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| profile.title());

    let (summaries, experiences, projects, education, advice) = tokio::join!(
        tailored_summaries(gateway, profile, &context),
        optimize_experiences(gateway, profile, job_skills),
        optimize_projects(gateway, profile, job_skills),
        optimize_education(gateway, profile),
        career_advice(gateway, &advice_target),
    );
    let selected = summaries.first().cloned().unwrap_or_default();

    let header = CvHeader {
        full_name: profile.full_name(),
        title: profile.title(),
        email: profile.user.email.trim().to_string(),
        phone: safe(profile.user.phone.as_deref()),
    };
    let content = render_ats_content(
        &header,
        &CvBody {
            summary: &selected,
            skills: &prioritized_skills,
            experiences: &experiences,
            educations: &education,
        },
    );

    CvDraft {
        tailored_summary: selected,
        tailored_summaries: summaries,
        ai_career_advice: advice,
        prioritized_skills,
        optimized_experiences: experiences,
        optimized_projects: projects,
        optimized_languages: copy_languages(profile),
        optimized_certificates: copy_certificates(profile),
        optimized_education: education,
        content,
    }
}

async fn insert_generated_cv(
    pool: &PgPool,
    user_id: Uuid,
    job_posting_id: Option<Uuid>,
    draft: &CvDraft,
) -> Result<GeneratedCvRow, AppError> {
    Ok(sqlx::query_as::<_, GeneratedCvRow>(
        r#"
        INSERT INTO generated_cvs (id, user_id, job_posting_id, template_name, content, ai_career_advice)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(job_posting_id)
    .bind(TEMPLATE_NAME)
    .bind(&draft.content)
    .bind(&draft.ai_career_advice)
    .fetch_one(pool)
    .await?)
}

/// Runs the full generation pipeline and persists the result.
pub async fn generate_cv(
    pool: &PgPool,
    gateway: &ProviderGateway,
    user_id: Uuid,
    job_id: Option<Uuid>,
) -> Result<GeneratedCv, AppError> {
    info!(%user_id, ?job_id, "CV generation started");
    let profile = load_profile(pool, user_id).await?;
    if profile.profile.is_none() {
        return Err(AppError::NotFound(format!("Kullanıcı profili bulunamadı: {user_id}")));
    }

    let job = resolve_job(pool, user_id, job_id).await?;
    let draft = build_cv_draft(gateway, &profile, job.as_ref()).await;

    let row = insert_generated_cv(pool, user_id, job.as_ref().and_then(|j| j.id), &draft).await?;
    info!(%user_id, cv_id = %row.id, "CV saved");

    Ok(GeneratedCv {
        cv_id: row.id,
        template_name: row.template_name,
        draft,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{offline, scripted};
    use crate::models::profile::fixtures::profile_with_skills;
    use crate::models::profile::EducationRow;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn backend_job() -> JobTarget {
        JobTarget {
            id: Some(Uuid::new_v4()),
            position: "Backend Developer".into(),
            required_skills: "Docker, spring".into(),
            responsibilities: "API geliştirmek".into(),
        }
    }

    #[test]
    fn test_prioritize_skills_moves_job_matches_first() {
        let skills = strings(&["Python", "Spring Boot", "Git", "Docker Compose"]);
        assert_eq!(
            prioritize_skills(&skills, "Docker, spring"),
            vec!["Spring Boot", "Docker Compose", "Python", "Git"]
        );
        assert_eq!(prioritize_skills(&skills, " ; "), skills);
    }

    #[test]
    fn test_job_context_for_missing_and_placeholder_posting() {
        let expected = "Pozisyon: Genel Başvuru\nBeceriler: \nSorumluluklar: ";
        assert_eq!(job_context(None), expected);
        assert_eq!(job_context(Some(&JobTarget::general_application())), expected);
        assert_eq!(
            job_context(Some(&backend_job())),
            "Pozisyon: Backend Developer\nBeceriler: Docker, spring\nSorumluluklar: API geliştirmek"
        );
    }

    #[tokio::test]
    async fn test_career_advice_messages() {
        assert_eq!(career_advice(&offline(), "  ").await, "Tavsiye oluşturulamadı.");
        assert_eq!(career_advice(&offline(), "Java Developer").await, "Kariyer tavsiyesi şu an oluşturulamıyor.");

        let (gateway, prompts) = scripted(|_| Some("- Bulut becerilerine yatırım yapın\n".into()));
        assert_eq!(career_advice(&gateway, "Java Developer").await, "- Bulut becerilerine yatırım yapın");
        assert!(prompts.lock().unwrap()[0].contains("'Java Developer' pozisyonu için"));
    }

    #[tokio::test]
    async fn test_offline_draft_is_complete_and_assembled() {
        let mut profile = profile_with_skills(&["Python", "Docker"], Some(3));
        profile.educations = vec![EducationRow {
            id: Uuid::new_v4(),
            school_name: "ODTÜ".into(),
            department: Some("Bilgisayar Mühendisliği".into()),
            degree: None,
            start_year: Some("2015".into()),
            graduation_year: Some("2019".into()),
            gpa: None,
        }];
        let job = backend_job();

        let draft = build_cv_draft(&offline(), &profile, Some(&job)).await;
        assert_eq!(draft.tailored_summaries.len(), 7);
        assert_eq!(draft.tailored_summary, draft.tailored_summaries[0]);
        assert_eq!(draft.prioritized_skills, vec!["Docker", "Python"]);
        assert_eq!(draft.ai_career_advice, "Kariyer tavsiyesi şu an oluşturulamıyor.");
        assert!(draft.optimized_experiences.is_empty());
        assert!(draft.content.starts_with(&format!("{}\nAYŞE YILMAZ\nYazılım Geliştirici\n", "=".repeat(50))));
        assert!(draft.content.contains("Docker, Python\n"));
        assert!(draft.content.contains("🏫 ODTÜ\n   Bilgisayar Mühendisliği | 2015 - 2019\n"));
        assert!(!draft.content.contains("WORK EXPERIENCE"));
    }

    #[tokio::test]
    async fn test_advice_targets_profile_title_without_posting() {
        let (gateway, prompts) = scripted(|_| None);
        let profile = profile_with_skills(&[], None);
        build_cv_draft(&gateway, &profile, None).await;
        assert!(prompts
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.contains("'Yazılım Geliştirici' pozisyonu için")));
    }
}
