//! Market analysis: skill demand for an area, from stored postings or from general AI knowledge.
//!
//! With at least `CORPUS_THRESHOLD` relevant postings the skill table is counted from the
//! postings themselves; below that the AI is asked for a typical skill list instead.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store;
use crate::llm_client::{parse_json_lenient, ProviderGateway};
use crate::matching::prompts::{CORPUS_MARKET_PROMPT, GENERAL_MARKET_PROMPT, MARKET_SKILLS_PROMPT};
use crate::models::job::JobPostingRow;
use crate::models::profile::Profile;
use crate::profile::context::market_context;
use crate::profile::store::load_profile;
use crate::text::{safe, tr_lowercase, truncate_with_ellipsis};

pub const CORPUS_THRESHOLD: usize = 100;
pub const CORPUS_LIMIT: i64 = 200;
pub const DEFAULT_AREA: &str = "Software Development";

const TOP_SKILLS: usize = 20;
const MISSING_LIMIT: usize = 15;
const AI_DEFAULT_FREQUENCY: u32 = 50;
const POSTINGS_IN_PROMPT: usize = 100;
const POSTING_EXCERPT: usize = 500;
const MIN_REPORT_LEN: usize = 50;
const REJECTED_REPORT_MARKERS: [&str; 2] = ["gerçekleştirilemiyor", "lütfen daha sonra"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPath {
    /// Skill demand counted from stored postings.
    Corpus,
    /// Skill demand estimated by the AI.
    General,
}

impl MarketPath {
    pub fn for_corpus(size: usize) -> Self {
        if size >= CORPUS_THRESHOLD {
            MarketPath::Corpus
        } else {
            MarketPath::General
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillStat {
    pub skill_name: String,
    pub frequency: u32,
    pub percentage: f64,
    pub user_has_skill: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub area: String,
    pub user_department: Option<String>,
    pub user_title: Option<String>,
    pub top_skills_in_market: Vec<SkillStat>,
    pub user_missing_skills: Vec<String>,
    pub ai_recommendation: Option<String>,
    pub is_auto_analyzed: bool,
    pub corpus_size: usize,
    pub path: MarketPath,
}

// ────────────────────────────────────────────────────────────────────────────
// Pure helpers
// ────────────────────────────────────────────────────────────────────────────

/// The requested area, else the profile department, else the profile title.
/// The flag is true when the area was derived from the profile.
pub fn resolve_area(requested: Option<&str>, profile: &Profile) -> Result<(String, bool), AppError> {
    let requested = safe(requested);
    if !requested.is_empty() {
        return Ok((requested, false));
    }
    let derived = crate::text::first_non_blank(
        [
            profile.profile.as_ref().and_then(|p| p.department.as_deref()),
            profile.profile.as_ref().and_then(|p| p.title.as_deref()),
        ],
        "",
    );
    if derived.is_empty() {
        return Err(AppError::Validation(
            "Analiz alanı belirlenemedi. Lütfen alan adını belirtin veya profil bilgilerinizi güncelleyin."
                .into(),
        ));
    }
    Ok((derived, true))
}

/// Top skills by how many postings list them, most frequent first.
/// Ties keep first-seen order.
pub fn skill_frequency(postings: &[JobPostingRow]) -> Vec<(String, u32)> {
    // skill -> (count, first-seen position)
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();
    for skills in postings.iter().filter_map(|p| p.required_skills.as_deref()) {
        for skill in skills
            .split([',', ';', '\n', '\r'])
            .map(str::trim)
            .filter(|s| s.chars().count() > 1)
        {
            let seen = counts.len();
            counts.entry(tr_lowercase(skill)).or_insert((0, seen)).0 += 1;
        }
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(name, (count, first))| (name, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(TOP_SKILLS)
        .map(|(name, count, _)| (name, count))
        .collect()
}

/// Reads `{"skills":[{"name","frequency"}]}`; missing frequencies count as 50.
pub fn parse_ai_skills(text: &str) -> Vec<(String, u32)> {
    let Ok(root) = parse_json_lenient::<Value>(text) else {
        warn!("market skill list is not JSON, using an empty list");
        return Vec::new();
    };
    let mut skills: Vec<(String, u32)> = root
        .get("skills")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let name = item.get("name")?.as_str()?.trim();
                    if name.is_empty() {
                        return None;
                    }
                    let frequency = item
                        .get("frequency")
                        .and_then(Value::as_u64)
                        .map_or(AI_DEFAULT_FREQUENCY, |f| f.min(u32::MAX as u64) as u32);
                    Some((name.to_string(), frequency))
                })
                .collect()
        })
        .unwrap_or_default();
    skills.sort_by(|a, b| b.1.cmp(&a.1));
    skills
}

/// Loose coverage: either lowercase string contains the other.
pub fn user_covers(user_skills: &[String], market_skill: &str) -> bool {
    let market = tr_lowercase(market_skill.trim());
    user_skills.iter().any(|owned| {
        let owned = tr_lowercase(owned.trim());
        !owned.is_empty() && (owned.contains(&market) || market.contains(&owned))
    })
}

/// The first 15 market skills the user does not cover.
pub fn missing_skills(user_skills: &[String], market: &[(String, u32)]) -> Vec<String> {
    market
        .iter()
        .take(MISSING_LIMIT)
        .filter(|(skill, _)| !user_covers(user_skills, skill))
        .map(|(skill, _)| skill.clone())
        .collect()
}

/// Drops failure notices and too-short replies.
pub fn accept_report(text: Option<String>) -> Option<String> {
    let text = text?;
    let lower = tr_lowercase(&text);
    if REJECTED_REPORT_MARKERS.iter().any(|m| lower.contains(m))
        || text.trim().chars().count() <= MIN_REPORT_LEN
    {
        warn!(len = text.len(), "market report rejected");
        return None;
    }
    Some(text)
}

/// Posting digest embedded in the corpus prompt.
pub fn format_postings(postings: &[JobPostingRow]) -> String {
    let mut out = format!("TOPLAM İLAN SAYISI: {}\n\n", postings.len());
    for (i, p) in postings.iter().take(POSTINGS_IN_PROMPT).enumerate() {
        out.push_str(&format!(
            "--- İLAN {} ---\nPOZİSYON: {}\nGEREKLİ BECERİLER: {}\nAÇIKLAMA: {}\n\n",
            i + 1,
            safe(p.position.as_deref()),
            safe(p.required_skills.as_deref()),
            truncate_with_ellipsis(&safe(p.cleaned_text.as_deref()), POSTING_EXCERPT),
        ));
    }
    out
}

fn to_stats(skills: &[(String, u32)], user_skills: &[String], corpus_size: Option<usize>) -> Vec<SkillStat> {
    skills
        .iter()
        .map(|(name, frequency)| {
            let percentage = match corpus_size {
                Some(n) if n > 0 => (*frequency as f64 * 1000.0 / n as f64).round() / 10.0,
                _ => (*frequency).min(100) as f64,
            };
            SkillStat {
                skill_name: name.clone(),
                frequency: *frequency,
                percentage,
                user_has_skill: user_covers(user_skills, name),
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

/// Builds the report for an already-selected corpus.
pub async fn build_report(
    gateway: &ProviderGateway,
    profile: &Profile,
    area: &str,
    auto_analyzed: bool,
    corpus: &[JobPostingRow],
) -> MarketReport {
    let path = MarketPath::for_corpus(corpus.len());
    let user_skills = profile.skill_names();
    let profile_block = market_context(profile);

    let (skills, stats, recommendation) = match path {
        MarketPath::Corpus => {
            info!(area, corpus = corpus.len(), "market analysis from stored postings");
            let skills = skill_frequency(corpus);
            let stats = to_stats(&skills, &user_skills, Some(corpus.len()));
            let prompt = CORPUS_MARKET_PROMPT
                .replace("{area}", area)
                .replace("{postings}", &format_postings(corpus))
                .replace("{profile}", &profile_block);
            let report = gateway.try_complete(&prompt, "market_report_corpus").await;
            (skills, stats, report)
        }
        MarketPath::General => {
            warn!(area, corpus = corpus.len(), "too few postings, using general market knowledge");
            let skills_prompt = MARKET_SKILLS_PROMPT.replace("{area}", area);
            let skills = gateway
                .try_complete(&skills_prompt, "market_skills")
                .await
                .map(|text| parse_ai_skills(&text))
                .unwrap_or_default();
            let stats = to_stats(&skills, &user_skills, None);
            let prompt = GENERAL_MARKET_PROMPT
                .replace("{area}", area)
                .replace("{profile}", &profile_block);
            let report = gateway.try_complete(&prompt, "market_report_general").await;
            (skills, stats, report)
        }
    };

    MarketReport {
        area: area.to_string(),
        user_department: profile.profile.as_ref().and_then(|p| p.department.clone()),
        user_title: profile.profile.as_ref().and_then(|p| p.title.clone()),
        top_skills_in_market: stats,
        user_missing_skills: missing_skills(&user_skills, &skills),
        ai_recommendation: accept_report(recommendation),
        is_auto_analyzed: auto_analyzed,
        corpus_size: corpus.len(),
        path,
    }
}

/// Resolves the area, selects the corpus and builds the report.
pub async fn analyze_market(
    pool: &PgPool,
    gateway: &ProviderGateway,
    user_id: Uuid,
    requested_area: Option<&str>,
) -> Result<MarketReport, AppError> {
    let profile = load_profile(pool, user_id).await?;
    let (area, auto_analyzed) = resolve_area(requested_area, &profile)?;
    info!(%user_id, area, auto_analyzed, "market analysis started");

    let mut corpus = store::top_by_position(pool, &area, CORPUS_LIMIT).await?;
    if corpus.len() < CORPUS_THRESHOLD {
        warn!(found = corpus.len(), "few postings by position, widening to content search");
        corpus = store::top_by_content(pool, &area, CORPUS_LIMIT).await?;
    }

    Ok(build_report(gateway, &profile, &area, auto_analyzed, &corpus).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{offline, scripted};
    use crate::models::profile::fixtures::profile_with_skills;
    use crate::models::profile::ProfileRow;
    use chrono::Utc;

    fn posting(skills: &str) -> JobPostingRow {
        JobPostingRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            url: "Manuel Giriş".into(),
            raw_text: None,
            cleaned_text: Some("Backend geliştirici aranıyor".into()),
            position: Some("Backend Developer".into()),
            company: None,
            location: None,
            work_type: None,
            experience_level: None,
            required_skills: Some(skills.into()),
            responsibilities: None,
            analysis_report: None,
            created_at: Utc::now(),
        }
    }

    fn with_profile_row(mut p: Profile, department: Option<&str>, title: Option<&str>) -> Profile {
        p.profile = Some(ProfileRow {
            id: Uuid::new_v4(),
            user_id: p.user.id,
            title: title.map(String::from),
            summary: None,
            department: department.map(String::from),
            linkedin_url: None,
            github_url: None,
            website_url: None,
            total_experience_years: None,
            updated_at: Utc::now(),
        });
        p
    }

    const LONG_REPORT: &str = "## Pazar Analizi\nJava ve Spring Boot bilgisi bu alanda en çok aranan yetkinlikler arasında yer alıyor.";

    #[test]
    fn test_resolve_area_order() {
        let p = with_profile_row(profile_with_skills(&[], None), Some("Makine Mühendisliği"), Some("Tasarımcı"));
        assert_eq!(resolve_area(Some(" Veri Bilimi "), &p).unwrap(), ("Veri Bilimi".into(), false));
        assert_eq!(resolve_area(None, &p).unwrap(), ("Makine Mühendisliği".into(), true));

        let p = with_profile_row(profile_with_skills(&[], None), None, Some("Tasarımcı"));
        assert_eq!(resolve_area(Some(""), &p).unwrap(), ("Tasarımcı".into(), true));

        let p = profile_with_skills(&[], None);
        assert!(matches!(resolve_area(None, &p), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_skill_frequency_counts_and_orders() {
        let corpus = vec![
            posting("Java, SQL; Docker"),
            posting("java\nDocker"),
            posting("Java, x, Kubernetes"),
        ];
        let freq = skill_frequency(&corpus);
        assert_eq!(freq[0], ("java".to_string(), 3));
        assert_eq!(freq[1], ("docker".to_string(), 2));
        assert_eq!(freq[2], ("sql".to_string(), 1));
        assert!(!freq.iter().any(|(s, _)| s == "x"));
    }

    #[test]
    fn test_skill_frequency_breaks_ties_by_first_appearance() {
        let corpus = vec![
            posting("Rust, Kafka, Redis"),
            posting("redis, rust, kafka"),
            posting("Go, Redis"),
        ];
        let names: Vec<String> = skill_frequency(&corpus).into_iter().map(|(s, _)| s).collect();
        assert_eq!(names, vec!["redis", "rust", "kafka", "go"]);
    }

    #[test]
    fn test_skill_frequency_keeps_top_twenty() {
        let skills: Vec<String> = (0..30).map(|i| format!("skill{i}")).collect();
        let corpus = vec![posting(&skills.join(", "))];
        assert_eq!(skill_frequency(&corpus).len(), 20);
    }

    #[test]
    fn test_parse_ai_skills_defaults_and_sorts() {
        let text = "```json\n{\"skills\":[{\"name\":\"Excel\"},{\"name\":\"AutoCAD\",\"frequency\":90},{\"name\":\" \"}]}\n```";
        assert_eq!(
            parse_ai_skills(text),
            vec![("AutoCAD".to_string(), 90), ("Excel".to_string(), 50)]
        );
        assert!(parse_ai_skills("maalesef").is_empty());
    }

    #[test]
    fn test_missing_skills_loose_match() {
        let user = vec!["Spring Boot".to_string(), "SQL".to_string()];
        let market = vec![
            ("spring".to_string(), 10),
            ("postgresql".to_string(), 8),
            ("docker".to_string(), 5),
        ];
        assert_eq!(missing_skills(&user, &market), vec!["docker"]);
    }

    #[test]
    fn test_accept_report_filters_failures() {
        assert_eq!(accept_report(None), None);
        assert_eq!(accept_report(Some("kısa".into())), None);
        assert_eq!(
            accept_report(Some(format!("{LONG_REPORT} Lütfen daha sonra tekrar deneyin."))),
            None
        );
        assert_eq!(accept_report(Some(LONG_REPORT.into())).as_deref(), Some(LONG_REPORT));
    }

    #[tokio::test]
    async fn test_small_corpus_uses_general_path() {
        let (gateway, prompts) = scripted(|prompt| {
            if prompt.contains("SADECE JSON") {
                Some(r#"{"skills":[{"name":"Java","frequency":80},{"name":"Docker","frequency":60}]}"#.into())
            } else {
                Some(LONG_REPORT.into())
            }
        });
        let corpus: Vec<JobPostingRow> = (0..40).map(|_| posting("Cobol")).collect();
        let profile = profile_with_skills(&["Java"], Some(2));

        let report = build_report(&gateway, &profile, "Backend", false, &corpus).await;
        assert_eq!(report.path, MarketPath::General);
        assert_eq!(report.corpus_size, 40);
        let names: Vec<&str> = report.top_skills_in_market.iter().map(|s| s.skill_name.as_str()).collect();
        assert_eq!(names, vec!["Java", "Docker"]);
        assert!(report.top_skills_in_market[0].user_has_skill);
        assert_eq!(report.top_skills_in_market[0].percentage, 80.0);
        assert_eq!(report.user_missing_skills, vec!["Docker"]);
        assert_eq!(report.ai_recommendation.as_deref(), Some(LONG_REPORT));

        let prompts = prompts.lock().unwrap();
        assert!(prompts.iter().all(|p| !p.contains("TÜM İLAN VERİLERİ")));
    }

    #[tokio::test]
    async fn test_large_corpus_counts_postings() {
        let (gateway, prompts) = scripted(|_| Some(LONG_REPORT.into()));
        let corpus: Vec<JobPostingRow> = (0..120)
            .map(|i| posting(if i % 2 == 0 { "Java, Docker" } else { "Java" }))
            .collect();
        let profile = profile_with_skills(&["Docker"], None);

        let report = build_report(&gateway, &profile, "Backend", true, &corpus).await;
        assert_eq!(report.path, MarketPath::Corpus);
        assert_eq!(report.top_skills_in_market[0].skill_name, "java");
        assert_eq!(report.top_skills_in_market[0].frequency, 120);
        assert_eq!(report.top_skills_in_market[0].percentage, 100.0);
        assert_eq!(report.top_skills_in_market[1].percentage, 50.0);
        assert_eq!(report.user_missing_skills, vec!["java"]);
        assert!(report.is_auto_analyzed);

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("TOPLAM İLAN SAYISI: 120"));
    }

    #[tokio::test]
    async fn test_offline_gateway_still_reports() {
        let profile = profile_with_skills(&["Java"], None);
        let report = build_report(&offline(), &profile, "Backend", false, &[]).await;
        assert_eq!(report.path, MarketPath::General);
        assert!(report.top_skills_in_market.is_empty());
        assert_eq!(report.ai_recommendation, None);
    }
}
