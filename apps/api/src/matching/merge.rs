//! Combines the two AI extractions of a posting into one record.
//!
//! The strict ("universal") extraction wins field by field; the looser detailed
//! extraction fills whatever it left blank.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::text::{empty_to_unspecified, first_non_blank, safe};

const UNSPECIFIED: &str = "Belirtilmemiş";
const UNKNOWN_COMPANY: &str = "Bilinmiyor";

/// Fields one extraction call produced. Absent and `null` values are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingExtraction {
    pub position: String,
    pub company: String,
    pub location: String,
    pub work_type: String,
    pub experience_level: String,
    pub education_level: String,
    pub military_status: String,
    pub salary: String,
    pub summary: String,
    pub technical_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub languages: Vec<String>,
}

impl PostingExtraction {
    /// Reads the camelCase keys the extraction prompts ask for.
    pub fn from_json(root: &Value) -> Self {
        Self {
            position: text_field(root, "position"),
            company: text_field(root, "company"),
            location: text_field(root, "location"),
            work_type: text_field(root, "workType"),
            experience_level: text_field(root, "experienceLevel"),
            education_level: text_field(root, "educationLevel"),
            military_status: text_field(root, "militaryStatus"),
            salary: text_field(root, "salary"),
            summary: text_field(root, "summary"),
            technical_skills: list_field(root, "technicalSkills"),
            responsibilities: list_field(root, "responsibilities"),
            languages: list_field(root, "languages"),
        }
    }

    /// Summary with the required languages appended.
    fn summary_with_languages(&self) -> String {
        if self.languages.is_empty() {
            return self.summary.clone();
        }
        let languages = self.languages.join(", ");
        if self.summary.is_empty() {
            format!("Gereken Diller: {languages}")
        } else {
            format!("{} | Gereken Diller: {languages}", self.summary)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedPosting {
    pub position: String,
    pub company: String,
    pub location: String,
    pub work_type: String,
    pub experience_level: String,
    pub education_level: String,
    pub military_status: String,
    pub salary: String,
    pub summary: String,
    pub technical_skills: Vec<String>,
    pub responsibilities: Vec<String>,
}

pub fn merge_extractions(universal: &PostingExtraction, detailed: &PostingExtraction) -> MergedPosting {
    let pick = |u: &str, d: &str, default: &str| first_non_blank([Some(u), Some(d)], default);
    let summary = universal.summary_with_languages();

    MergedPosting {
        position: pick(&universal.position, &detailed.position, UNSPECIFIED),
        company: pick(&universal.company, &detailed.company, UNKNOWN_COMPANY),
        location: pick(&universal.location, &detailed.location, UNSPECIFIED),
        work_type: pick(&universal.work_type, &detailed.work_type, UNSPECIFIED),
        experience_level: pick(&universal.experience_level, &detailed.experience_level, UNSPECIFIED),
        education_level: pick(&universal.education_level, &detailed.education_level, UNSPECIFIED),
        military_status: empty_to_unspecified(Some(universal.military_status.as_str())),
        salary: empty_to_unspecified(Some(universal.salary.as_str())),
        summary: pick(&summary, &detailed.summary, ""),
        technical_skills: ordered_union(&universal.technical_skills, &detailed.technical_skills),
        responsibilities: ordered_union(&universal.responsibilities, &detailed.responsibilities),
    }
}

fn ordered_union(first: &[String], second: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(first.len() + second.len());
    first
        .iter()
        .chain(second)
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

fn text_field(root: &Value, key: &str) -> String {
    match root.get(key) {
        Some(Value::String(s)) => safe(Some(s.as_str())),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// An array of strings, or a comma-separated string. Blanks and repeats are dropped.
fn list_field(root: &Value, key: &str) -> Vec<String> {
    let raw: Vec<String> = match root.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(|p| p.trim().to_string()).collect(),
        _ => Vec::new(),
    };
    ordered_union(&raw.into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>(), &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_universal_wins_when_present() {
        let universal = PostingExtraction::from_json(&json!({
            "position": "Backend Developer",
            "company": "null",
            "location": "  ",
            "technicalSkills": ["Java", "Docker", "Java"]
        }));
        let detailed = PostingExtraction::from_json(&json!({
            "position": "Yazılım Uzmanı",
            "company": "Acme",
            "location": "Ankara",
            "technicalSkills": "Docker, SQL"
        }));

        let merged = merge_extractions(&universal, &detailed);
        assert_eq!(merged.position, "Backend Developer");
        assert_eq!(merged.company, "Acme");
        assert_eq!(merged.location, "Ankara");
        assert_eq!(merged.technical_skills, vec!["Java", "Docker", "SQL"]);
    }

    #[test]
    fn test_failed_extractions_use_defaults() {
        let empty = PostingExtraction::default();
        let merged = merge_extractions(&empty, &empty);
        assert_eq!(merged.position, "Belirtilmemiş");
        assert_eq!(merged.company, "Bilinmiyor");
        assert_eq!(merged.work_type, "Belirtilmemiş");
        assert_eq!(merged.military_status, "Belirtilmemiş");
        assert_eq!(merged.salary, "Belirtilmemiş");
        assert_eq!(merged.summary, "");
        assert!(merged.technical_skills.is_empty());
    }

    #[test]
    fn test_languages_join_summary() {
        let universal = PostingExtraction::from_json(&json!({
            "summary": "Kurumsal projelerde görev alacak geliştirici.",
            "languages": ["İngilizce", "Almanca"],
            "salary": 50000
        }));
        let merged = merge_extractions(&universal, &PostingExtraction::default());
        assert_eq!(
            merged.summary,
            "Kurumsal projelerde görev alacak geliştirici. | Gereken Diller: İngilizce, Almanca"
        );
        assert_eq!(merged.salary, "50000");

        let only_languages = PostingExtraction::from_json(&json!({"languages": ["İngilizce"]}));
        let detailed = PostingExtraction::from_json(&json!({"summary": "Detaylı özet"}));
        assert_eq!(
            merge_extractions(&only_languages, &detailed).summary,
            "Gereken Diller: İngilizce"
        );
    }

    #[test]
    fn test_responsibilities_union_keeps_universal_first() {
        let universal = PostingExtraction::from_json(&json!({"responsibilities": ["API geliştirmek"]}));
        let detailed = PostingExtraction::from_json(&json!({
            "responsibilities": ["Kod incelemesi", "API geliştirmek", null]
        }));
        assert_eq!(
            merge_extractions(&universal, &detailed).responsibilities,
            vec!["API geliştirmek", "Kod incelemesi"]
        );
    }
}
