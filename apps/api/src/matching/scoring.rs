//! Job match scoring: skill ratio, experience ratio and the weighted overall score.

use serde::Serialize;

use crate::matching::parser::JobRequirements;
use crate::matching::skills::SkillTable;
use crate::models::profile::Profile;
use crate::text::tr_lowercase;

const SKILL_WEIGHT: f64 = 0.7;
const EXPERIENCE_WEIGHT: f64 = 0.3;

pub const LEVEL_HIGH: &str = "YÜKSEK";
pub const LEVEL_MEDIUM: &str = "ORTA";
pub const LEVEL_LOW: &str = "DÜŞÜK";

const MATCH_REQUIRED: &str = "ZORUNLU";
const MATCH_PREFERRED: &str = "TERCİH";
const LEVEL_UNSPECIFIED: &str = "BELİRTİLMEMİŞ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub skill: String,
    pub match_type: String,
    pub user_level: String,
    pub importance: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub match_percentage: u32,
    pub match_level: String,
    pub overall_score: f64,
    pub skill_ratio: f64,
    pub experience_ratio: f64,
    pub matching_skills: Vec<SkillMatch>,
    /// Required keywords the profile covers.
    pub matched_skills: Vec<String>,
    /// Required keywords the profile lacks.
    pub missing_keywords: Vec<String>,
    /// Display names of `missing_keywords`.
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub analysis_summary: String,
}

/// Share of `required` keywords present in `profile_skills`.
pub fn skill_ratio(profile_skills: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    if profile_skills.is_empty() {
        return 0.0;
    }
    let owned: Vec<String> = profile_skills.iter().map(|s| tr_lowercase(s.trim())).collect();
    let matched = required.iter().filter(|r| owned.contains(r)).count();
    matched as f64 / required.len() as f64
}

pub fn experience_ratio(profile_years: u32, required_years: u32) -> f64 {
    if required_years == 0 {
        return 1.0;
    }
    (profile_years as f64 / required_years as f64).min(1.0)
}

pub fn overall_score(skill_ratio: f64, experience_ratio: f64) -> f64 {
    SKILL_WEIGHT * skill_ratio + EXPERIENCE_WEIGHT * experience_ratio
}

pub fn match_level(score: f64) -> &'static str {
    if score >= 0.8 {
        LEVEL_HIGH
    } else if score >= 0.5 {
        LEVEL_MEDIUM
    } else {
        LEVEL_LOW
    }
}

pub fn score_match(profile: &Profile, job: &JobRequirements, table: &SkillTable) -> MatchReport {
    let skill_names = profile.skill_names();
    let owned: Vec<String> = skill_names.iter().map(|s| tr_lowercase(s)).collect();
    let years = profile.experience_years();

    let skill_ratio = skill_ratio(&skill_names, &job.required_skills);
    let experience_ratio = experience_ratio(years, job.min_experience);
    let overall = overall_score(skill_ratio, experience_ratio);
    let level = match_level(overall);

    let matching_skills = matching_skills(profile, job, table);
    let (matched_skills, missing_keywords): (Vec<String>, Vec<String>) = job
        .required_skills
        .iter()
        .cloned()
        .partition(|k| owned.contains(k));
    let missing_skills: Vec<String> =
        missing_keywords.iter().map(|k| table.display_name(k)).collect();
    let recommendations = recommendations(&missing_skills, years, job);

    let name = profile
        .user
        .full_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Kullanıcı");
    let analysis_summary = format!(
        "{name} kullanıcısı için analiz tamamlandı. Toplam {} yetenek eşleşti, {} kritik yetenek eksik. Eşleşme seviyesi: {level}",
        matching_skills.len(),
        missing_skills.len(),
    );

    MatchReport {
        match_percentage: (overall * 100.0).round() as u32,
        match_level: level.to_string(),
        overall_score: overall,
        skill_ratio,
        experience_ratio,
        matching_skills,
        matched_skills,
        missing_keywords,
        missing_skills,
        recommendations,
        analysis_summary,
    }
}

/// Profile skills named by the posting, in profile order.
fn matching_skills(profile: &Profile, job: &JobRequirements, table: &SkillTable) -> Vec<SkillMatch> {
    if job.required_skills.is_empty() && job.preferred_skills.is_empty() {
        return Vec::new();
    }

    profile
        .skills
        .iter()
        .filter_map(|skill| {
            let key = tr_lowercase(skill.skill_name.trim());
            let required = job.required_skills.contains(&key);
            if !required && !job.preferred_skills.contains(&key) {
                return None;
            }
            let info = table.get(&key);
            Some(SkillMatch {
                skill: info.map_or_else(|| skill.skill_name.trim().to_string(), |i| i.name.clone()),
                match_type: if required { MATCH_REQUIRED } else { MATCH_PREFERRED }.to_string(),
                user_level: skill
                    .level
                    .as_deref()
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or(LEVEL_UNSPECIFIED)
                    .to_string(),
                importance: table.weight(&key),
            })
        })
        .collect()
}

fn recommendations(missing: &[String], profile_years: u32, job: &JobRequirements) -> Vec<String> {
    let mut out: Vec<String> = missing
        .iter()
        .map(|m| format!("Eksik yetkinlik: {m}. Bu alanda online kurs veya proje geliştirmenizi öneririz."))
        .collect();

    if job.min_experience > profile_years {
        out.push(format!(
            "Deneyim süreniz ilan için {} yıl eksik. Staj veya freelance projelerle kapatmayı deneyin.",
            job.min_experience - profile_years
        ));
    }

    if !job.location.trim().is_empty() {
        out.push(format!(
            "Lokasyon: {}. İş için taşınma/yerleşim planınızı gözden geçirin.",
            job.location.trim()
        ));
    }

    if out.is_empty() {
        out.push("Tebrikler! Bu ilan için teknik profiliniz oldukça güçlü görünüyor.".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::parser::parse_posting;
    use crate::models::profile::fixtures::{profile_with_skills, skill};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skill_ratio_edges() {
        assert_eq!(skill_ratio(&[], &[]), 1.0);
        assert_eq!(skill_ratio(&strings(&["Java"]), &[]), 1.0);
        assert_eq!(skill_ratio(&[], &strings(&["java"])), 0.0);
        assert_eq!(skill_ratio(&strings(&["JAVA", "Go"]), &strings(&["java", "sql"])), 0.5);
    }

    #[test]
    fn test_experience_ratio_caps_at_one() {
        assert_eq!(experience_ratio(0, 0), 1.0);
        assert_eq!(experience_ratio(10, 3), 1.0);
        assert_eq!(experience_ratio(1, 4), 0.25);
    }

    #[test]
    fn test_match_level_boundaries() {
        assert_eq!(match_level(0.8), LEVEL_HIGH);
        assert_eq!(match_level(0.5), LEVEL_MEDIUM);
        assert_eq!(match_level(0.49999), LEVEL_LOW);
        assert_eq!(match_level(1.0), LEVEL_HIGH);
    }

    #[test]
    fn test_scenario_python_only() {
        let table = SkillTable::builtin();
        let job = parse_posting("Gereken Deneyim: 3 yıl. Python, SQL bilgisi şart.", &table);
        let profile = profile_with_skills(&["Python"], Some(1));

        let report = score_match(&profile, &job, &table);
        assert_eq!(report.matched_skills, vec!["python"]);
        assert_eq!(report.missing_keywords, vec!["sql"]);
        assert_eq!(report.missing_skills, vec!["SQL"]);

        let expected = 0.7 * 0.5 + 0.3 * (1.0 / 3.0);
        assert!((report.overall_score - expected).abs() < 1e-9);
        assert_eq!(report.match_percentage, 45);
        assert_eq!(report.match_level, LEVEL_LOW);
        assert_eq!(report.matching_skills.len(), 1);
        assert_eq!(report.matching_skills[0].skill, "Python");
        assert_eq!(report.matching_skills[0].match_type, "ZORUNLU");
        assert_eq!(report.matching_skills[0].user_level, "BELİRTİLMEMİŞ");
        assert_eq!(report.matching_skills[0].importance, 8);
    }

    #[test]
    fn test_recommendations_cover_gaps() {
        let table = SkillTable::builtin();
        let job = parse_posting("Lokasyon: Aksaray\nEn az 4 yıl deneyim\nJava ve SQL", &table);
        let profile = profile_with_skills(&["Java"], Some(1));
        let report = score_match(&profile, &job, &table);

        assert_eq!(report.recommendations.len(), 3);
        assert!(report.recommendations[0].starts_with("Eksik yetkinlik: SQL."));
        assert!(report.recommendations[1].contains("3 yıl eksik"));
        assert!(report.recommendations[2].starts_with("Lokasyon: Aksaray."));
    }

    #[test]
    fn test_congratulates_full_match() {
        let table = SkillTable::builtin();
        let job = parse_posting("Docker ve Kubernetes", &table);
        let mut profile = profile_with_skills(&["Docker"], None);
        profile.skills.push(skill("kubernetes", Some("İleri")));
        let report = score_match(&profile, &job, &table);

        assert_eq!(report.match_percentage, 100);
        assert_eq!(report.match_level, LEVEL_HIGH);
        assert_eq!(
            report.recommendations,
            vec!["Tebrikler! Bu ilan için teknik profiliniz oldukça güçlü görünüyor."]
        );
        assert_eq!(report.matching_skills[1].user_level, "İleri");
        assert!(report.analysis_summary.starts_with("Ayşe Yılmaz kullanıcısı için"));
    }

    #[test]
    fn test_preferred_skill_reported_as_tercih() {
        let table = SkillTable::builtin();
        let job = parse_posting("Java şart. AWS bilgisi tercih sebebidir.", &table);
        let profile = profile_with_skills(&["AWS"], None);
        let report = score_match(&profile, &job, &table);
        assert_eq!(report.matching_skills[0].match_type, "TERCİH");
    }
}
