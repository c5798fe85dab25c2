//! Technology-term extraction and preservation for rewritten descriptions.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::text::tr_lowercase;

/// Vocabulary scanned by `extract_technical_terms`.
const COMMON_TECHS: &[&str] = &[
    "java", "python", "javascript", "typescript", "react", "angular", "vue", "node.js", "nodejs",
    "spring", "spring boot", "django", "flask", "express", "laravel", "php", "c#", "c++", "c",
    "sql", "mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite",
    "html", "css", "sass", "less", "bootstrap", "tailwind",
    "docker", "kubernetes", "aws", "azure", "gcp", "jenkins", "git", "github", "gitlab",
    "rest", "restful", "api", "graphql", "soap", "microservice", "microservices",
    "backend", "frontend", "fullstack", "full-stack", "full stack",
    "android", "ios", "swift", "kotlin", "flutter", "react native",
    "machine learning", "ml", "ai", "deep learning", "tensorflow", "pytorch",
    "agile", "scrum", "devops", "ci/cd", "cicd",
];

/// Most missing terms appended to a description in one sentence.
const MAX_APPENDED_TERMS: usize = 3;

static TECH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    COMMON_TECHS
        .iter()
        .map(|t| {
            RegexBuilder::new(&regex::escape(t))
                .case_insensitive(true)
                .build()
                .expect("Should compile: TECH_PATTERNS")
        })
        .collect()
});

/// "X ile" / "X kullanarak" phrases; X is one or two ASCII words.
static USAGE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]+(?:\s+[a-z]+)?)\s+(?:ile|kullanarak)\b")
        .expect("Should compile: USAGE_PHRASE_RE")
});

/// Letters, digits and the symbols that belong to names like `c++` or `c#`.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// True when `text[start..end]` is not glued to neighbouring word characters.
pub(crate) fn has_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

fn is_known_tech(term: &str) -> bool {
    COMMON_TECHS.contains(&term.to_lowercase().as_str())
}

/// Collects technology names mentioned in `text`, comma-joined in discovery order.
///
/// Casing is taken from the first bounded occurrence in the source text.
pub fn extract_technical_terms(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut terms: Vec<String> = Vec::new();
    let mut push = |term: &str| {
        let key = tr_lowercase(term);
        if !terms.iter().any(|t| tr_lowercase(t) == key) {
            terms.push(term.to_string());
        }
    };

    for pattern in TECH_PATTERNS.iter() {
        if let Some(m) = pattern
            .find_iter(text)
            .find(|m| has_word_boundaries(text, m.start(), m.end()))
        {
            push(m.as_str());
        }
    }

    for caps in USAGE_PHRASE_RE.captures_iter(text) {
        let phrase = caps[1].trim();
        if is_known_tech(phrase) {
            push(phrase);
            continue;
        }
        for word in phrase.split_whitespace().filter(|w| is_known_tech(w)) {
            push(word);
        }
    }

    let lower = tr_lowercase(text);
    for standalone in ["backend", "frontend"] {
        if lower.contains(standalone) {
            push(standalone);
        }
    }

    terms.join(", ")
}

/// Appends up to three of `tech_terms` that `desc` does not already mention.
pub fn ensure_technical_terms(desc: &str, tech_terms: &str) -> String {
    if tech_terms.trim().is_empty() || desc.trim().is_empty() {
        return desc.to_string();
    }

    let lower_desc = tr_lowercase(desc);
    let missing: Vec<&str> = tech_terms
        .split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty() && !lower_desc.contains(&tr_lowercase(t)))
        .take(MAX_APPENDED_TERMS)
        .collect();

    if missing.is_empty() {
        return desc.to_string();
    }
    let joined = missing.join(", ");

    match desc.split_once('.') {
        Some((first, rest)) if !rest.trim().is_empty() => format!(
            "{}. {} Bu süreçte {joined} teknolojilerini/becerilerini kullandım.",
            first.trim(),
            rest.trim()
        ),
        Some(_) => format!(
            "{} Bu görevde {joined} teknolojilerini/becerilerini aktif olarak kullandım.",
            desc.trim()
        ),
        None => format!(
            "{}. Bu görevde {joined} teknolojilerini/becerilerini aktif olarak kullandım.",
            desc.trim()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(text: &str) -> Vec<String> {
        extract_technical_terms(text)
            .split(", ")
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_extract_keeps_source_casing() {
        let found = terms("Spring Boot ve PostgreSQL ile REST servisleri yazdım.");
        assert!(found.contains(&"Spring Boot".to_string()));
        assert!(found.contains(&"PostgreSQL".to_string()));
        assert!(found.contains(&"REST".to_string()));
    }

    #[test]
    fn test_extract_respects_word_boundaries() {
        let found = terms("Javascript bilmiyorum ama scrumble oynadım.");
        assert!(found.contains(&"Javascript".to_string()));
        assert!(!found.iter().any(|t| t.eq_ignore_ascii_case("java")));
        assert!(!found.iter().any(|t| t.eq_ignore_ascii_case("scrum")));
    }

    #[test]
    fn test_extract_symbol_names() {
        let found = terms("C# ve C++ ile masaüstü uygulamaları");
        assert!(found.contains(&"C#".to_string()));
        assert!(found.contains(&"C++".to_string()));
        assert!(!found.contains(&"C".to_string()));
    }

    #[test]
    fn test_extract_backend_frontend() {
        let found = terms("Tüm backend katmanını yönettim");
        assert_eq!(found, vec!["backend"]);
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract_technical_terms("  "), "");
        assert_eq!(extract_technical_terms("Muhasebe raporları hazırladım."), "");
    }

    #[test]
    fn test_ensure_terms_appends_to_second_sentence() {
        let out = ensure_technical_terms("API geliştirdim. Testleri yazdım.", "Java, API, Docker");
        assert_eq!(
            out,
            "API geliştirdim. Testleri yazdım. Bu süreçte Java, Docker teknolojilerini/becerilerini kullandım."
        );
    }

    #[test]
    fn test_ensure_terms_single_sentence_with_period() {
        let out = ensure_technical_terms("Servisleri yönettim.", "Kubernetes");
        assert_eq!(
            out,
            "Servisleri yönettim. Bu görevde Kubernetes teknolojilerini/becerilerini aktif olarak kullandım."
        );
    }

    #[test]
    fn test_ensure_terms_without_period() {
        let out = ensure_technical_terms("Servisleri yönettim", "Go");
        assert_eq!(
            out,
            "Servisleri yönettim. Bu görevde Go teknolojilerini/becerilerini aktif olarak kullandım."
        );
    }

    #[test]
    fn test_ensure_terms_caps_at_three_and_skips_present() {
        let out = ensure_technical_terms("Java ile yazdım", "java, a1, b2, c3, d4");
        assert!(out.contains("a1, b2, c3 "));
        assert!(!out.contains("d4"));
        assert_eq!(ensure_technical_terms("Java kullandım", "JAVA"), "Java kullandım");
    }
}
