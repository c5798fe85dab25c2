//! Sentence-count enforcement.
//!
//! Output shape is deterministic (sentence counts) while the filler text picked for
//! short inputs is partly random.

use std::sync::LazyLock;

use rand::prelude::*;
use regex::Regex;

use super::clean_description;
use crate::text::tr_lowercase;

/// Fragments of this many characters or fewer are noise in two-sentence mode.
const MIN_SENTENCE_CHARS: usize = 25;

const FILLER_SENTENCES: [&str; 10] = [
    "Bu alanda sürekli kendimi geliştirmeye devam ediyorum.",
    "Teknik yetkinliğimi artırmak için sürekli öğreniyorum.",
    "Projelerde başarılı sonuçlar elde etmek için çalışıyorum.",
    "Takım çalışması ve iletişim becerilerimi geliştiriyorum.",
    "Yeni teknolojilere adapte olma konusunda hızlıyım.",
    "Problem çözme ve analitik düşünme yeteneklerimi kullanıyorum.",
    "Detaylara dikkat eden ve sonuç odaklı çalışan bir profesyonelim.",
    "Organizasyonlara değer katmayı hedefliyorum.",
    "Kariyerimde ilerlemek için sürekli çalışıyorum.",
    "Teknik bilgimi pratik projelerde uyguluyorum.",
];

const GENERIC_FILLER: &str = "Bu konuda deneyimli ve yetkin bir profesyonelim.";

const FALLBACK_PAIRS: [&str; 3] = [
    "İlgili alanda teknik sorumluluklar üstlenerek projelerin başarıyla tamamlanmasına katkı sağladım. Süreç boyunca modern teknolojileri kullanarak verimli çözümler ürettim.",
    "Farklı projelerde yer alarak deneyim kazandım. Bu süreçte teknik bilgimi pratiğe dönüştürdüm ve başarılı sonuçlar elde ettim.",
    "Görevlerim sırasında problem çözme yeteneklerimi geliştirdim. Ekip çalışması ve teknik uygulamalar konularında değerli deneyimler kazandım.",
];

/// Second-sentence families keyed by words found in the first sentence.
/// The last entry has no keywords and always matches.
const SECOND_SENTENCES: [(&[&str], [&str; 4]); 5] = [
    (
        &["geliştirdim", "geliştirme"],
        [
            "Bu süreçte teknik yetkinliğimi artırdım ve projenin başarıyla tamamlanmasına katkı sağladım.",
            "Geliştirme sürecinde çeşitli teknik zorluklarla karşılaştım ve bunları başarıyla çözdüm.",
            "Bu deneyim sayesinde modern geliştirme pratiklerini öğrendim ve uyguladım.",
            "Projelerin başarıyla tamamlanması için etkili çözümler ürettim ve değerli deneyimler kazandım.",
        ],
    ),
    (
        &["çalıştım", "görev"],
        [
            "Bu deneyim sayesinde problem çözme ve takım çalışması konularında kendimi geliştirdim.",
            "Görevlerim sırasında teknik bilgimi pratiğe dönüştürdüm ve başarılı sonuçlar elde ettim.",
            "Bu süreçte ekip içi işbirliği ve teknik problem çözme konularında deneyim kazandım.",
            "Çalıştığım projelerde aktif rol alarak farklı teknolojileri öğrendim ve uyguladım.",
        ],
    ),
    (
        &["proje"],
        [
            "Projenin başarıyla tamamlanmasına katkı sağladım ve bu süreçte değerli deneyimler kazandım.",
            "Bu projede çeşitli teknik görevler üstlendim ve başarılı sonuçlar elde ettim.",
            "Projenin geliştirilmesi sırasında yaratıcı çözümler ürettim ve teknik yetkinliğimi artırdım.",
            "Projede aktif olarak çalışarak modern teknolojileri öğrendim ve uyguladım.",
        ],
    ),
    (
        &["teknoloji"],
        [
            "Bu teknolojileri kullanarak kaliteli çözümler ürettim ve projelerin başarıyla tamamlanmasına katkı sağladım.",
            "Teknolojileri etkin bir şekilde uygulayarak teknik yetkinliğimi geliştirdim ve başarılı sonuçlar elde ettim.",
            "Bu araçları kullanarak çeşitli projelerde yer aldım ve değerli deneyimler kazandım.",
            "Modern teknolojilerle çalışarak problem çözme yeteneklerimi geliştirdim ve etkili çözümler ürettim.",
        ],
    ),
    (
        &[],
        [
            "Bu süreçte başarılı sonuçlar elde ettim ve deneyimlerimi artırdım.",
            "Çalışmalarım sırasında teknik bilgimi geliştirdim ve önemli başarılar elde ettim.",
            "Bu deneyim sayesinde farklı projelerde yer alarak kendimi geliştirdim.",
            "Süreç boyunca aktif rol alarak değerli deneyimler kazandım ve başarılı sonuçlar elde ettim.",
        ],
    ),
];

static TERMINATOR_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Should compile: TERMINATOR_RUN_RE"));
static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("Should compile: SENTENCE_BREAK_RE"));
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*\s]+").expect("Should compile: LIST_MARKER_RE"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Should compile: WHITESPACE_RE"));

/// Non-blank segments between runs of `.`, `!` or `?`.
fn sentence_segments(text: &str) -> Vec<&str> {
    TERMINATOR_RUN_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn count_sentences(text: &str) -> usize {
    sentence_segments(text).len()
}

fn is_terminated(s: &str) -> bool {
    s.ends_with(['.', '!', '?'])
}

fn terminate(mut s: String) -> String {
    if !is_terminated(&s) {
        s.push('.');
    }
    s
}

/// Pads `text` with filler up to `min` sentences or truncates it to `max`.
pub fn ensure_sentence_count(text: &str, min: usize, max: usize) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let segments = sentence_segments(text);
    let count = segments.len();

    if count < min {
        let mut out = terminate(text.trim().to_string());
        for filler in FILLER_SENTENCES.iter().take(min - count) {
            out.push(' ');
            out.push_str(filler);
        }
        while count_sentences(&out) < min {
            out.push(' ');
            out.push_str(GENERIC_FILLER);
        }
        return out;
    }

    if count > max {
        return segments
            .iter()
            .take(max)
            .map(|s| terminate(s.to_string()))
            .collect::<Vec<_>>()
            .join(" ");
    }

    text.to_string()
}

/// Splits after `.`, `!` or `?` when followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK_RE.find_iter(text) {
        // terminators are single-byte ASCII
        parts.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    parts.push(&text[start..]);
    parts
}

/// Normalizes an item description to exactly two meaningful sentences.
///
/// Fragments of 25 characters or fewer are dropped. A lone surviving sentence gets a
/// contextual second sentence; nothing usable yields a random fallback pair.
pub fn ensure_exactly_two_sentences(text: &str) -> String {
    if text.trim().is_empty() {
        return random_fallback_pair();
    }

    let text = clean_description(text);
    let valid: Vec<String> = split_sentences(&text)
        .into_iter()
        .map(|s| {
            let s = LIST_MARKER_RE.replace(s.trim(), "");
            WHITESPACE_RE.replace_all(&s, " ").into_owned()
        })
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(terminate)
        .collect();

    match valid.as_slice() {
        [] => random_fallback_pair(),
        [only] => format!("{only} {}", terminate(second_sentence_for(only).to_string())),
        [first, second, ..] => format!("{first} {second}"),
    }
}

fn random_fallback_pair() -> String {
    let mut rng = rand::rng();
    FALLBACK_PAIRS
        .choose(&mut rng)
        .copied()
        .unwrap_or(FALLBACK_PAIRS[0])
        .to_string()
}

/// Picks a follow-up sentence matching the theme of `first`.
pub fn second_sentence_for(first: &str) -> &'static str {
    let lower = tr_lowercase(first);
    let mut rng = rand::rng();
    SECOND_SENTENCES
        .iter()
        .find(|(keywords, _)| keywords.is_empty() || keywords.iter().any(|k| lower.contains(*k)))
        .and_then(|(_, variants)| variants.choose(&mut rng).copied())
        .unwrap_or(GENERIC_FILLER)
}
