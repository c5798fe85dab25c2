//! Plain-text renderings of a profile used inside prompts.

use std::fmt::Write;

use crate::models::profile::Profile;
use crate::text::safe;

const UNSPECIFIED: &str = "Belirtilmemiş";

/// `start - end`, with "Belirtilmemiş" / "Devam Ediyor" for blanks.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = Some(safe(start)).filter(|s| !s.is_empty());
    let end = Some(safe(end)).filter(|s| !s.is_empty());
    format!(
        "{} - {}",
        start.as_deref().unwrap_or(UNSPECIFIED),
        end.as_deref().unwrap_or("Devam Ediyor")
    )
}

/// Profile block for the recruiter-style posting report.
pub fn analysis_context(p: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== TEMEL BİLGİLER ===");
    let _ = writeln!(out, "Başlık: {}", p.title());
    if p.experience_years() > 0 {
        let _ = writeln!(out, "Toplam Deneyim: {} yıl", p.experience_years());
    }

    let _ = writeln!(out, "\n=== ANALİZ İÇİN KRİTİK YETKİNLİKLER (TEKNİK + DİL) ===");
    let capabilities: Vec<String> = p
        .languages
        .iter()
        .map(|l| format!("DİL: {} (Seviye: {})", l.language.trim(), safe(l.level.as_deref())))
        .chain(p.skill_names())
        .collect();
    let _ = writeln!(out, "{}", capabilities.join(", "));

    if !p.experiences.is_empty() {
        let _ = writeln!(out, "\n=== DENEYİM ÖZETİ ===");
        for e in p.experiences.iter().take(5) {
            let _ = writeln!(
                out,
                "- {} @ {} ({})",
                safe(e.position.as_deref()),
                safe(e.company.as_deref()),
                format_date_range(e.start_date.as_deref(), e.end_date.as_deref())
            );
        }
    }

    write_educations(&mut out, p);
    out
}

/// Profile block for market analysis prompts.
pub fn market_context(p: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== TEMEL BİLGİLER ===");
    let _ = writeln!(out, "Başlık/Uzmanlık: {}", p.title());
    if p.experience_years() > 0 {
        let _ = writeln!(out, "Toplam Deneyim: {} yıl", p.experience_years());
    }

    let _ = writeln!(out, "\n=== TEKNİK BECERİLER ===");
    let skills = p.skill_names();
    if skills.is_empty() {
        let _ = writeln!(out, "{UNSPECIFIED}");
    }
    for skill in skills {
        let _ = writeln!(out, "- {skill}");
    }

    let _ = writeln!(out, "\n=== DİL BİLGİSİ ===");
    if p.languages.is_empty() {
        let _ = writeln!(out, "{UNSPECIFIED}");
    }
    for l in &p.languages {
        let _ = writeln!(out, "- {} ({})", l.language.trim(), safe(l.level.as_deref()));
    }

    if p.educations.is_empty() {
        let _ = writeln!(out, "\n=== EĞİTİM ===\n{UNSPECIFIED}");
    } else {
        write_educations(&mut out, p);
    }
    out
}

/// Profile block for summary generation.
pub fn summary_context(p: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Başlık/Unvan: {}", p.title());
    if p.experience_years() > 0 {
        let _ = writeln!(out, "Toplam Deneyim: {} yıl", p.experience_years());
    }

    let skills = p.skill_names();
    let _ = writeln!(
        out,
        "\nYetenekler: {}",
        if skills.is_empty() { UNSPECIFIED.to_string() } else { skills.join(", ") }
    );

    if !p.experiences.is_empty() {
        let _ = writeln!(out, "\nDeneyimler:");
        for e in p.experiences.iter().take(5) {
            let _ = writeln!(
                out,
                "- {} @ {}: {}",
                safe(e.position.as_deref()),
                safe(e.company.as_deref()),
                safe(e.description.as_deref())
            );
        }
    }

    if !p.projects.is_empty() {
        let _ = writeln!(out, "\nProjeler:");
        for proj in p.projects.iter().take(3) {
            let _ = writeln!(
                out,
                "- {}: {}",
                proj.project_name.trim(),
                safe(proj.description.as_deref())
            );
        }
    }
    out
}

fn write_educations(out: &mut String, p: &Profile) {
    if p.educations.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n=== EĞİTİM ===");
    for e in &p.educations {
        let _ = writeln!(
            out,
            "- {}, {} ({})",
            safe(e.department.as_deref()),
            e.school_name.trim(),
            safe(e.degree.as_deref())
        );
    }
}
