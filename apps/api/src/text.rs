//! Small string helpers shared by the matcher, sanitizer and generation pipeline.
//!
//! Profile and posting data is Turkish, so lowercasing must map `I` → `ı` and
//! `İ` → `i` before the generic Unicode rules run.

/// Locale-aware lowercase for Turkish text.
pub fn tr_lowercase(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'I' => vec!['ı'],
            'İ' => vec!['i'],
            other => other.to_lowercase().collect(),
        })
        .collect()
}

/// Locale-aware uppercase: `i` → `İ`, `ı` → `I`.
pub fn tr_uppercase(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'i' => vec!['İ'],
            'ı' => vec!['I'],
            other => other.to_uppercase().collect(),
        })
        .collect()
}

/// Trims `value`; `None` and the literal string "null" become empty.
pub fn safe(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().eq_ignore_ascii_case("null") => v.trim().to_string(),
        _ => String::new(),
    }
}

/// First candidate that is neither blank nor "null", else `default`.
pub fn first_non_blank<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>, default: &str) -> String {
    candidates
        .into_iter()
        .map(safe)
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Blank → "Belirtilmemiş".
pub fn empty_to_unspecified(value: Option<&str>) -> String {
    first_non_blank([value], "Belirtilmemiş")
}

/// Trims, then cuts to `max` characters ending in "..." when too long.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let kept: String = trimmed.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Upper-cases the first letter of each word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let rest: String = chars.collect();
                    format!("{}{}", tr_uppercase(&first.to_string()), tr_lowercase(&rest))
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a `,`/`;` separated list into trimmed, non-empty items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tr_lowercase_dotted_and_dotless_i() {
        assert_eq!(tr_lowercase("İSTANBUL"), "istanbul");
        assert_eq!(tr_lowercase("ISPARTA"), "ısparta");
        assert_eq!(tr_lowercase("Java"), "java");
    }

    #[test]
    fn test_tr_uppercase() {
        assert_eq!(tr_uppercase("ayşe yılmaz"), "AYŞE YILMAZ");
        assert_eq!(tr_uppercase("istanbul"), "İSTANBUL");
    }

    #[test]
    fn test_safe_treats_null_as_empty() {
        assert_eq!(safe(Some(" null ")), "");
        assert_eq!(safe(Some("NULL")), "");
        assert_eq!(safe(None), "");
        assert_eq!(safe(Some("  Ankara ")), "Ankara");
    }

    #[test]
    fn test_first_non_blank() {
        assert_eq!(first_non_blank([Some(""), Some("null"), Some("Acme")], "x"), "Acme");
        assert_eq!(first_non_blank([None, Some("  ")], "Bilinmiyor"), "Bilinmiyor");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("  short  ", 10), "short");
        assert_eq!(truncate_with_ellipsis("abcdefghij", 8), "abcde...");
        assert_eq!(truncate_with_ellipsis("çğüşöıçğüş", 6), "çğü...");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("yazılım GELİŞTİRİCİ"), "Yazılım Geliştirici");
        assert_eq!(title_case("izmir ofisi"), "İzmir Ofisi");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("Java, SQL;; Docker ,"), vec!["Java", "SQL", "Docker"]);
    }
}
