//! Posting parser: line-oriented field extraction plus a whole-text skill keyword scan.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::matching::skills::SkillTable;
use crate::sanitizer::tech_terms::is_word_char;
use crate::text::tr_lowercase;

/// Characters examined on each side of a keyword for preference indicators.
const PREFERENCE_WINDOW: usize = 50;
/// Keywords at least this long may carry a suffix ("analizi", "docker'da").
const SUFFIX_TOLERANT_LEN: usize = 6;
/// Longer lines are content, never section headers.
const MAX_HEADER_LEN: usize = 60;

static COMPANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)şirket:|firma:|company:").expect("Should compile: COMPANY_RE")
});
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)lokasyon:|konum:|yer:|şehir:|location:").expect("Should compile: LOCATION_RE")
});
static POSITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)unvan:|pozisyon:|position:|title:").expect("Should compile: POSITION_RE")
});
static WORK_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)çalışma şekli:|tam zamanlı|yarı zamanlı|remote|hybrid")
        .expect("Should compile: WORK_TYPE_RE")
});
static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*\+?\s*(?:yıl|yil|years?|yrs?)\b").expect("Should compile: YEARS_RE")
});
static PREFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tercih|artı|plus|prefer|advantage|nice to have")
        .expect("Should compile: PREFERENCE_RE")
});
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("Should compile: BULLET_RE"));

const EXPERIENCE_WORDS: [&str; 3] = ["deneyim", "tecrübe", "experience"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Requirements,
    Responsibilities,
    Strengths,
    Warnings,
}

const SECTION_HEADERS: &[(&str, Section)] = &[
    ("aranan nitelikler", Section::Requirements),
    ("requirements", Section::Requirements),
    ("qualifications", Section::Requirements),
    ("görevler", Section::Responsibilities),
    ("sorumluluklar", Section::Responsibilities),
    ("responsibilities", Section::Responsibilities),
    ("güçlü yönler", Section::Strengths),
    ("strengths", Section::Strengths),
    ("dikkat edilmesi gerekenler", Section::Warnings),
    ("warnings", Section::Warnings),
];

/// Structured view of a free-text posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobRequirements {
    pub company: String,
    pub location: String,
    pub position: String,
    pub work_type: String,
    pub min_experience: u32,
    /// Lines collected under a requirements header, bullets removed.
    pub requirements: Vec<String>,
    /// Skill-table keywords found without a nearby preference indicator.
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub strengths: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn parse_posting(text: &str, table: &SkillTable) -> JobRequirements {
    let mut req = JobRequirements::default();
    let mut section = Section::None;

    for line in text.lines().map(str::trim) {
        if COMPANY_RE.is_match(line) {
            req.company = extract_value(line);
        } else if LOCATION_RE.is_match(line) {
            req.location = extract_value(line);
        } else if POSITION_RE.is_match(line) {
            req.position = extract_value(line);
        } else if WORK_TYPE_RE.is_match(line) {
            req.work_type = extract_value(line);
        } else if let Some(years) = experience_years(line) {
            req.min_experience = years;
        } else if let Some(next) = section_header(line) {
            section = next;
        } else if !line.is_empty() {
            let item = clean_item(line);
            match section {
                Section::Requirements => req.requirements.push(item),
                Section::Responsibilities => req.responsibilities.push(item),
                Section::Strengths => req.strengths.push(item),
                Section::Warnings => req.warnings.push(item),
                Section::None => {}
            }
        }
    }

    scan_skills(text, table, &mut req);
    req
}

/// Text after the first ':', else the whole line.
fn extract_value(line: &str) -> String {
    match line.split_once(':') {
        Some((_, value)) => value.trim().to_string(),
        None => line.trim().to_string(),
    }
}

fn clean_item(line: &str) -> String {
    BULLET_RE.replace(line, "").trim().to_string()
}

fn experience_years(line: &str) -> Option<u32> {
    let lower = tr_lowercase(line);
    if !EXPERIENCE_WORDS.iter().any(|w| lower.contains(w)) {
        return None;
    }
    YEARS_RE
        .captures(&lower)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

fn section_header(line: &str) -> Option<Section> {
    if line.chars().count() > MAX_HEADER_LEN {
        return None;
    }
    let lower = tr_lowercase(line);
    SECTION_HEADERS
        .iter()
        .find(|(header, _)| lower.contains(header))
        .map(|&(_, section)| section)
}

fn scan_skills(text: &str, table: &SkillTable, req: &mut JobRequirements) {
    let lower = tr_lowercase(text);

    for skill in table.iter() {
        let occurrences: Vec<(usize, usize)> = lower
            .match_indices(skill.keyword.as_str())
            .map(|(start, m)| (start, start + m.len()))
            .filter(|&(start, end)| keyword_bounded(&lower, start, end, &skill.keyword))
            .collect();
        if occurrences.is_empty() {
            continue;
        }

        let preferred = occurrences
            .iter()
            .any(|&(start, end)| PREFERENCE_RE.is_match(window(&lower, start, end)));
        let target = if preferred {
            &mut req.preferred_skills
        } else {
            &mut req.required_skills
        };
        if !target.contains(&skill.keyword) {
            target.push(skill.keyword.clone());
        }
    }
}

/// The leading edge must always be a boundary; the trailing edge only for short keywords.
fn keyword_bounded(text: &str, start: usize, end: usize, keyword: &str) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    if !before_ok {
        return false;
    }
    if keyword.chars().count() >= SUFFIX_TOLERANT_LEN {
        return true;
    }
    text[end..].chars().next().map_or(true, |c| !is_word_char(c))
}

/// `text[start..end]` widened by `PREFERENCE_WINDOW` characters on both sides.
fn window(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(PREFERENCE_WINDOW - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(PREFERENCE_WINDOW)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> JobRequirements {
        parse_posting(text, &SkillTable::builtin())
    }

    #[test]
    fn test_parse_scenario_sentence() {
        let req = parse("Gereken Deneyim: 3 yıl. Python, SQL bilgisi şart.");
        assert_eq!(req.min_experience, 3);
        assert!(req.required_skills.contains(&"python".to_string()));
        assert!(req.required_skills.contains(&"sql".to_string()));
        assert!(req.preferred_skills.is_empty());
    }

    #[test]
    fn test_parse_labeled_lines() {
        let text = "Şirket: Acme Yazılım\nLokasyon: İzmir\nPozisyon: Backend Developer\nÇalışma Şekli: Hibrit";
        let req = parse(text);
        assert_eq!(req.company, "Acme Yazılım");
        assert_eq!(req.location, "İzmir");
        assert_eq!(req.position, "Backend Developer");
        assert_eq!(req.work_type, "Hibrit");
    }

    #[test]
    fn test_work_type_without_colon_keeps_line() {
        let req = parse("Remote");
        assert_eq!(req.work_type, "Remote");
    }

    #[test]
    fn test_sections_collect_items() {
        let text = "Aranan Nitelikler\n\
                    - Java ile birkaç büyük ölçekli kurumsal projede aktif görev almış olmak\n\
                    • Docker tecrübesi tercih sebebidir\n\n\
                    Görevler\n* API geliştirmek\n\
                    Güçlü Yönler\n- Esnek çalışma\n\
                    Dikkat Edilmesi Gerekenler\n- Yoğun tempo";
        let req = parse(text);
        assert_eq!(
            req.requirements,
            vec![
                "Java ile birkaç büyük ölçekli kurumsal projede aktif görev almış olmak",
                "Docker tecrübesi tercih sebebidir"
            ]
        );
        assert_eq!(req.responsibilities, vec!["API geliştirmek"]);
        assert_eq!(req.strengths, vec!["Esnek çalışma"]);
        assert_eq!(req.warnings, vec!["Yoğun tempo"]);
        assert!(req.required_skills.contains(&"java".to_string()));
        assert!(req.preferred_skills.contains(&"docker".to_string()));
        assert!(!req.required_skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_preference_window_is_local() {
        let filler = "x".repeat(80);
        let text = format!("Java zorunludur. {filler} Kubernetes bilgisi artı olarak değerlendirilir.");
        let req = parse(&text);
        assert!(req.required_skills.contains(&"java".to_string()));
        assert!(req.preferred_skills.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_keyword_boundaries() {
        let req = parse("JavaScript ve MySQL ile GitHub üzerinde çalıştık");
        assert!(req.required_skills.contains(&"javascript".to_string()));
        assert!(req.required_skills.contains(&"mysql".to_string()));
        assert!(!req.required_skills.contains(&"java".to_string()));
        assert!(!req.required_skills.contains(&"sql".to_string()));
        assert!(!req.required_skills.contains(&"git".to_string()));
    }

    #[test]
    fn test_long_keywords_tolerate_suffixes() {
        let req = parse("Veri analizi ve Docker'da deneyimli");
        assert!(req.required_skills.contains(&"analiz".to_string()));
        assert!(req.required_skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_symbol_keywords() {
        let req = parse("C# ve C++ bilen, .NET ile çalışmış");
        for key in ["c#", "c++", ".net"] {
            assert!(req.required_skills.contains(&key.to_string()), "{key} missing");
        }
    }

    #[test]
    fn test_experience_english() {
        assert_eq!(parse("At least 5+ years of experience").min_experience, 5);
        assert_eq!(parse("5 yıl").min_experience, 0);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(parse(""), JobRequirements::default());
    }

    #[test]
    fn test_window_multibyte() {
        let text = "ğğğ java şşş";
        let start = text.find("java").unwrap();
        assert_eq!(window(text, start, start + 4), text);
    }
}
