//! Plain-text ATS rendering of a generated CV.
//!
//! Pure and deterministic: the same input always renders byte-identical output, and
//! section and field order never change.

use std::fmt::Write;

use crate::generation::descriptions::{OptimizedEducation, OptimizedItem};
use crate::text::tr_uppercase;

const HEADER_RULE: usize = 50;
const SECTION_RULE: usize = 25;
const ONGOING: &str = "Devam";

/// Identity block at the top of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct CvHeader {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
}

/// Everything the document body is built from.
#[derive(Debug, Clone, Copy)]
pub struct CvBody<'a> {
    pub summary: &'a str,
    pub skills: &'a [String],
    pub experiences: &'a [OptimizedItem],
    pub educations: &'a [OptimizedEducation],
}

fn section(out: &mut String, heading: &str) {
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "-".repeat(SECTION_RULE));
}

pub fn render_ats_content(header: &CvHeader, body: &CvBody<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(HEADER_RULE));
    let _ = writeln!(out, "{}", tr_uppercase(&header.full_name));
    let _ = writeln!(out, "{}", header.title);
    let _ = writeln!(out, "{} | {}", header.email, header.phone);
    out.push('\n');

    section(&mut out, "🎯 PROFESSIONAL SUMMARY");
    let _ = writeln!(out, "{}\n", body.summary);

    section(&mut out, "🛠️ TECHNICAL SKILLS");
    let _ = writeln!(out, "{}\n", body.skills.join(", "));

    if !body.experiences.is_empty() {
        section(&mut out, "💼 WORK EXPERIENCE");
        for item in body.experiences {
            let _ = writeln!(out, "📌 {} @ {} ({})", item.title, item.subtitle, item.date);
            for line in &item.description {
                let _ = writeln!(out, "  • {line}");
            }
            out.push('\n');
        }
    }

    if !body.educations.is_empty() {
        section(&mut out, "🎓 EDUCATION");
        for edu in body.educations {
            let _ = writeln!(out, "🏫 {}", edu.school_name);
            let _ = writeln!(
                out,
                "   {} | {} - {}\n",
                edu.department,
                edu.start_year,
                edu.graduation_year.as_deref().unwrap_or(ONGOING)
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn header() -> CvHeader {
        CvHeader {
            full_name: "Ayşe Yılmaz".into(),
            title: "Backend Developer".into(),
            email: "ayse@example.com".into(),
            phone: "555 000 00 00".into(),
        }
    }

    #[test]
    fn test_golden_output() {
        let skills = vec!["Java".to_string(), "Docker".to_string()];
        let experiences = vec![OptimizedItem {
            title: "Backend Developer".into(),
            subtitle: "Acme".into(),
            date: "2021-01 - Devam Ediyor".into(),
            description: vec!["Sipariş servisini yazdım. Docker ile dağıttım.".into()],
        }];
        let educations = vec![
            OptimizedEducation {
                id: Uuid::nil(),
                school_name: "ODTÜ".into(),
                department: "Bilgisayar Mühendisliği".into(),
                degree: "Lisans".into(),
                start_year: "2015".into(),
                graduation_year: Some("2019".into()),
                gpa: String::new(),
            },
            OptimizedEducation {
                id: Uuid::nil(),
                school_name: "İTÜ".into(),
                department: "Yazılım".into(),
                degree: "Yüksek Lisans".into(),
                start_year: "2020".into(),
                graduation_year: None,
                gpa: String::new(),
            },
        ];
        let body = CvBody {
            summary: "Beş yıllık deneyime sahibim.",
            skills: &skills,
            experiences: &experiences,
            educations: &educations,
        };

        let expected = "\
==================================================
AYŞE YILMAZ
Backend Developer
ayse@example.com | 555 000 00 00

🎯 PROFESSIONAL SUMMARY
-------------------------
Beş yıllık deneyime sahibim.

🛠️ TECHNICAL SKILLS
-------------------------
Java, Docker

💼 WORK EXPERIENCE
-------------------------
📌 Backend Developer @ Acme (2021-01 - Devam Ediyor)
  • Sipariş servisini yazdım. Docker ile dağıttım.

🎓 EDUCATION
-------------------------
🏫 ODTÜ
   Bilgisayar Mühendisliği | 2015 - 2019

🏫 İTÜ
   Yazılım | 2020 - Devam

";
        assert_eq!(render_ats_content(&header(), &body), expected);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let body = CvBody {
            summary: "Özet.",
            skills: &[],
            experiences: &[],
            educations: &[],
        };
        let out = render_ats_content(&header(), &body);
        assert!(out.ends_with("🛠️ TECHNICAL SKILLS\n-------------------------\n\n\n"));
        assert!(!out.contains("WORK EXPERIENCE"));
        assert!(!out.contains("EDUCATION"));
    }
}
