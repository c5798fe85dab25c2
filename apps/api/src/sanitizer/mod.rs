//! Response Sanitizer: turns raw provider text into presentable prose.
//!
//! `clean_ai_text` removes generation artifacts (markdown, HTML, glyphs, AI
//! self-references, prefatory commentary). `clean_description` repairs JSON debris
//! left in stored profile descriptions. Sentence-shape enforcement lives in
//! `sentences`, technology-term preservation in `tech_terms`.

pub mod sentences;
pub mod tech_terms;

use std::sync::LazyLock;

use regex::Regex;

use crate::text::tr_lowercase;

pub use sentences::{ensure_exactly_two_sentences, ensure_sentence_count};
pub use tech_terms::{ensure_technical_terms, extract_technical_terms};

/// Word-bounded, case-insensitive phrases that must never reach the user.
/// Multi-word phrases come first so they are removed whole.
static BANNED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(as an ai|as a language model|i am an ai|ben bir ai|yapay zeka olarak)\b",
        r"(?i)\b(ai|yapay zeka|artificial intelligence|oluşturuldu|üretildi|generated|created by|created with|automatically generated)\b",
        r"(?i)\b(bu metin|bu özet|bu cv|bu özgeçmiş|this text|this summary|this cv|this resume)\b",
        r"(?i)\b(lütfen|please)\b",
        r"(?i)\b(not|note|important|dikkat|attention):",
        r"(?i)\b(here is|(?:i|İ)şte|aşağıda|below is|following is)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Should compile: BANNED_PATTERNS"))
    .collect()
});

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\w*").expect("Should compile: CODE_FENCE_RE"));
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##+|^#+\s*").expect("Should compile: HEADING_RE"));
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Should compile: HTML_TAG_RE"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Should compile: WHITESPACE_RE"));
static LEADING_WRAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["'()\[\]{}\s]+"#).expect("Should compile: LEADING_WRAP_RE")
});
static TRAILING_WRAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'()\[\]{}\s]+$"#).expect("Should compile: TRAILING_WRAP_RE")
});
static LEADING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(özet|summary|cv|özgeçmiş|resume):\s*")
        .expect("Should compile: LEADING_LABEL_RE")
});

static PREFIX_COMMENTARY: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^.*?aşağıdaki metin[^:]*:\s*",
        r"(?i)^.*?aşağıdaki metni[^:]*:\s*",
        r"(?i)^.*?anlamını bozmadan[^:]*:\s*",
        r"(?i)^.*?profesyonel bir dille[^:]*:\s*",
        r"(?i)^.*?düzeltildi[^:]*:\s*",
        r"(?i)^.*?düzeltilmiştir[^:]*:\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Should compile: PREFIX_COMMENTARY"))
    .collect()
});

/// Words that mark the text before an early colon as commentary.
const COLON_TRIGGERS: [&str; 3] = ["metin", "düzelt", "profesyonel"];

static BRACE_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("Should compile: BRACE_GROUP_RE"));
static BRACKET_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("Should compile: BRACKET_GROUP_RE"));
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("Should compile: QUOTED_RE"));
static EDGE_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[,\s:;\-]+|[,\s:;\-]+$").expect("Should compile: EDGE_PUNCT_RE")
});

/// Removes generation artifacts from provider output.
pub fn clean_ai_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut text = remove_prefix_commentary(text);
    for pattern in BANNED_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    text = CODE_FENCE_RE.replace_all(&text, "").into_owned();
    text = text.replace("**", "");
    text = HEADING_RE.replace_all(&text, "").into_owned();
    text = text.replace(['*', '_', '`'], "");
    text = HTML_TAG_RE.replace_all(&text, "").into_owned();
    text = text.replace(['→', '•', '✓'], "");

    text = WHITESPACE_RE.replace_all(&text, " ").into_owned();
    text = LEADING_WRAP_RE.replace(&text, "").into_owned();
    text = TRAILING_WRAP_RE.replace(&text, "").into_owned();
    text = LEADING_LABEL_RE.replace(&text, "").into_owned();

    text.trim().to_string()
}

/// Strips "here is the corrected text:" style framing from a rewrite.
///
/// Known prefixes are removed first. Then, if a colon sits in the first half of the
/// text and the part before it mentions a trigger word, everything up to and
/// including the colon is dropped.
pub fn remove_prefix_commentary(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let mut text = text.to_string();
    for pattern in PREFIX_COMMENTARY.iter() {
        text = pattern.replace(&text, "").into_owned();
    }

    let total = text.chars().count();
    if let Some(colon) = text.chars().position(|c| c == ':') {
        if colon > 0 && colon < total / 2 {
            let before: String = text.chars().take(colon).collect();
            let before = tr_lowercase(&before);
            if COLON_TRIGGERS.iter().any(|t| before.contains(t)) {
                text = text.chars().skip(colon + 1).collect();
            }
        }
    }

    text.trim().to_string()
}

/// Repairs stored descriptions: drops `{…}`/`[…]` debris and stray braces,
/// unquotes `"…"`, collapses whitespace and trims separator punctuation.
pub fn clean_description(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = BRACE_GROUP_RE.replace_all(text, "");
    let text = text.replace(['{', '}'], "");
    let text = BRACKET_GROUP_RE.replace_all(&text, "");
    let text = QUOTED_RE.replace_all(&text, "$1");
    let text = WHITESPACE_RE.replace_all(text.trim(), " ");
    let text = EDGE_PUNCT_RE.replace_all(&text, "");

    text.trim().to_string()
}
