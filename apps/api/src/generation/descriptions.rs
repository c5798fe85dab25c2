//! Per-item rewriting of the profile for a CV: experiences and projects get two-sentence
//! descriptions, education fields are cleaned, languages and certificates pass through.

use std::sync::LazyLock;

use rand::prelude::*;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::generation::prompts::{EXPERIENCE_PROMPT, GRAMMAR_FIX_PROMPT, PROJECT_PROMPT};
use crate::llm_client::ProviderGateway;
use crate::models::profile::{ExperienceRow, Profile, ProjectRow};
use crate::profile::context::format_date_range;
use crate::sanitizer::{
    clean_ai_text, clean_description, ensure_exactly_two_sentences, ensure_technical_terms,
    extract_technical_terms, remove_prefix_commentary,
};
use crate::text::{safe, split_list, tr_lowercase};

pub const PROJECT_SUBTITLE: &str = "Proje";
const UNSPECIFIED_SCHOOL: &str = "Belirtilmemiş";

/// Stored descriptions shorter than this are regenerated instead of rewritten.
const MIN_DESCRIPTION_CHARS: usize = 20;
/// Generated descriptions this short are replaced by a template.
const MIN_GENERATED_CHARS: usize = 30;
const MIN_REWRITE_CHARS: usize = 10;
const MAX_TEMPLATE_TECHS: usize = 3;

const EXPERIENCE_OPENERS: [&str; 4] = [
    "{pos} pozisyonunda {company} bünyesinde stratejik projelerde ve operasyonel süreçlerde görev aldım.",
    "{pos} olarak {company} çalışma fırsatı buldum ve çeşitli teknik projelerde yer aldım.",
    "{pos} rolünde {company} görev yaptım ve farklı projelerde aktif sorumluluklar üstlendim.",
    "{pos} unvanıyla {company} ekibinde bulundum ve operasyonel süreçlerde önemli katkılar sağladım.",
];

const EXPERIENCE_TECH_CLOSERS: [&str; 5] = [
    "Çalışmalarımda {techs} teknolojilerini etkin bir şekilde kullanarak sürdürülebilir ve ölçeklenebilir çözümler geliştirdim.",
    "Bu görevde {techs} gibi modern teknolojilerle çalışarak sistem mimarisi tasarımı ve performans optimizasyonu konularında deneyim kazandım.",
    "Projelerde {techs} teknolojilerini kullanarak RESTful API geliştirme, veritabanı yönetimi ve mikroservis mimarisi uyguladım.",
    "{techs} ile çalışma fırsatı buldum ve bu teknolojileri kullanarak ölçeklenebilir backend sistemleri ve cloud çözümleri geliştirdim.",
    "Bu süreçte {techs} teknolojilerini öğrenip uygulayarak veritabanı optimizasyonu, cache mekanizmaları ve API entegrasyonları gerçekleştirdim.",
];

const EXPERIENCE_PLAIN_CLOSER: &str =
    "Teknik yetkinliklerimi projelerin ihtiyaçları doğrultusunda kullanarak iş süreçlerinin iyileştirilmesine katkı sağladım.";

const PROJECT_OPENERS: [&str; 4] = [
    "{name} aktif olarak yer alarak kullanıcı arayüzü ve backend geliştirme görevlerini üstlendim.",
    "{name} geliştirme sürecinde bulunarak full-stack çözümler tasarladım ve uyguladım.",
    "{name} tasarım ve geliştirme aşamalarında rol alarak modern yazılım pratiklerini uyguladım.",
    "{name} üzerinde çalışarak ölçeklenebilir ve sürdürülebilir bir sistem mimarisi oluşturdum.",
];

const PROJECT_TECH_CLOSERS: [&str; 5] = [
    "Projede {techs} teknolojilerini kullanarak responsive tasarım, state yönetimi ve API entegrasyonu gerçekleştirdim.",
    "{techs} gibi modern araçları kullanarak authentication, veritabanı yönetimi ve real-time özellikler geliştirdim.",
    "Bu projede {techs} teknolojilerini öğrenip uygulayarak RESTful API tasarımı, JWT authentication ve cloud deployment yaptım.",
    "{techs} ile çalışarak component-based mimari, routing, form validation ve error handling mekanizmaları oluşturdum.",
    "Projenin geliştirilmesinde {techs} teknolojilerini kullanarak mikroservis mimarisi, containerization ve CI/CD pipeline kurulumu gerçekleştirdim.",
];

const PROJECT_PLAIN_CLOSER: &str =
    "Projenin tüm aşamalarında aktif rol alarak teknik bilgimi pratiğe dönüştürdüm ve başarılı çözümler ürettim.";

static COMMA_BRACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\{").expect("Should compile: COMMA_BRACE_RE"));
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*$").expect("Should compile: TRAILING_COMMA_RE"));

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One experience or project line of the CV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedItem {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedEducation {
    pub id: Uuid,
    pub school_name: String,
    pub department: String,
    pub degree: String,
    pub start_year: String,
    /// `None` while studies are ongoing.
    pub graduation_year: Option<String>,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedLanguage {
    pub id: Uuid,
    pub language: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedCertificate {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

fn needs_generation(desc: &str) -> bool {
    desc.is_empty() || desc.chars().count() < MIN_DESCRIPTION_CHARS || desc.starts_with('{')
}

/// AI copy-edit of user text. Short text and AI failures return the input unchanged.
pub async fn fix_grammar(gateway: &ProviderGateway, text: &str) -> String {
    if text.chars().count() < MIN_REWRITE_CHARS {
        return text.to_string();
    }
    let prompt = format!("{GRAMMAR_FIX_PROMPT}{text}");
    match gateway.try_complete(&prompt, "grammar_fix").await {
        Some(rewritten) => remove_prefix_commentary(rewritten.trim()),
        None => text.to_string(),
    }
}

/// Job skills mentioned in `text`, comma-joined in job order.
pub fn find_intersection(text: &str, job_skills: &str) -> String {
    let lower = tr_lowercase(text);
    let mut matched: Vec<String> = Vec::new();
    for skill in split_list(job_skills) {
        if lower.contains(&tr_lowercase(&skill)) && !matched.contains(&skill) {
            matched.push(skill);
        }
    }
    matched.join(", ")
}

/// Extra instruction naming the technologies the description must mention.
fn tech_emphasis(original_techs: &str, technologies: &str, job_skills: &str) -> String {
    if !original_techs.is_empty() {
        return format!(
            "\n\nÖNEMLİ: Mutlaka şu teknik terimleri/becerileri cümle içinde kullan: {original_techs} - Bu terimleri doğal bir şekilde cümle içinde geçir, liste halinde yazma."
        );
    }
    if !technologies.is_empty() {
        return format!(
            "\n\nÖNEMLİ: Mutlaka şu teknolojileri cümle içinde kullan: {technologies} - Bu teknolojileri doğal bir şekilde cümle içinde geçir, liste halinde yazma."
        );
    }
    let skills: Vec<String> = split_list(job_skills).into_iter().take(MAX_TEMPLATE_TECHS).collect();
    if skills.is_empty() {
        return String::new();
    }
    format!(
        "\n\nÖNEMLİ: Mutlaka şu becerileri/teknolojileri cümle içinde kullan: {} - Bu becerileri doğal bir şekilde cümle içinde geçir.",
        skills.join(", ")
    )
}

/// Up to three entries of `technologies`, else of `job_skills`.
fn template_techs(technologies: &str, job_skills: &str) -> String {
    let source = if technologies.is_empty() { job_skills } else { technologies };
    source
        .split([',', ';'])
        .take(MAX_TEMPLATE_TECHS)
        .map(str::trim)
        .filter(|t| t.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(", ")
}

fn pick<'a>(rng: &mut impl Rng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

/// Runs the AI prompt and normalizes the answer, or `None` when it is unusable.
async fn generate_with_ai(gateway: &ProviderGateway, prompt: &str, purpose: &str) -> Option<String> {
    let raw = gateway.try_complete(prompt, purpose).await?;
    let cleaned = clean_ai_text(&raw);
    if cleaned.chars().count() > MIN_GENERATED_CHARS {
        Some(ensure_exactly_two_sentences(&cleaned))
    } else {
        warn!(purpose, "generated description too short, using template");
        None
    }
}

/// Rewrites an existing description and puts back technical terms the rewrite lost.
async fn rewrite_existing(gateway: &ProviderGateway, desc: &str, original_techs: &str) -> String {
    let rewritten = fix_grammar(gateway, desc).await;
    ensure_technical_terms(&rewritten, original_techs)
}

// ────────────────────────────────────────────────────────────────────────────
// Experiences
// ────────────────────────────────────────────────────────────────────────────

pub fn experience_fallback(rng: &mut impl Rng, position: &str, company: &str, technologies: &str, job_skills: &str) -> String {
    let pos = if position.is_empty() { "Yazılım Geliştirici" } else { position };
    let company = if company.is_empty() {
        "sektörün öncü firmalarından birinde".to_string()
    } else {
        format!("{company} şirketinde")
    };
    let opener = pick(rng, &EXPERIENCE_OPENERS)
        .replace("{pos}", pos)
        .replace("{company}", &company);

    let techs = template_techs(technologies, job_skills);
    let closer = if techs.is_empty() {
        EXPERIENCE_PLAIN_CLOSER.to_string()
    } else {
        pick(rng, &EXPERIENCE_TECH_CLOSERS).replace("{techs}", &techs)
    };
    format!("{opener} {closer}")
}

fn experience_details(exp: &ExperienceRow) -> String {
    let position = safe(exp.position.as_deref());
    let company = safe(exp.company.as_deref());
    let city = safe(exp.city.as_deref());
    let employment_type = safe(exp.employment_type.as_deref());
    let technologies = safe(exp.technologies.as_deref());

    let mut lines = vec![
        format!("Pozisyon: {}", if position.is_empty() { "Teknik Pozisyon" } else { &position }),
        format!("Şirket: {}", if company.is_empty() { "Bir şirket" } else { &company }),
    ];
    if !city.is_empty() {
        lines.push(format!("Konum: {city}"));
    }
    if !employment_type.is_empty() {
        lines.push(format!("Çalışma Tipi: {employment_type}"));
    }
    if !technologies.is_empty() {
        lines.push(format!("Kullanılan Teknolojiler: {technologies}"));
    }
    lines.push(format!(
        "Tarih: {}",
        format_date_range(exp.start_date.as_deref(), exp.end_date.as_deref())
    ));
    lines.join("\n")
}

async fn generate_experience_description(
    gateway: &ProviderGateway,
    exp: &ExperienceRow,
    job_skills: &str,
    original_techs: &str,
) -> String {
    let technologies = safe(exp.technologies.as_deref());
    let prompt = EXPERIENCE_PROMPT
        .replace("{details}", &experience_details(exp))
        .replace("{job_skills}", job_skills)
        .replace("{emphasis}", &tech_emphasis(original_techs, &technologies, job_skills));

    if let Some(desc) = generate_with_ai(gateway, &prompt, "experience_description").await {
        return desc;
    }
    let techs = if original_techs.is_empty() { &technologies } else { original_techs };
    experience_fallback(
        &mut rand::rng(),
        &safe(exp.position.as_deref()),
        &safe(exp.company.as_deref()),
        techs,
        job_skills,
    )
}

pub async fn optimize_experience(gateway: &ProviderGateway, exp: &ExperienceRow, job_skills: &str) -> OptimizedItem {
    let original = safe(exp.description.as_deref());
    let original_techs = extract_technical_terms(&original);
    let cleaned = clean_description(&original);

    let desc = if needs_generation(&cleaned) {
        debug!(position = ?exp.position, "experience description missing, generating");
        generate_experience_description(gateway, exp, job_skills, &original_techs).await
    } else {
        rewrite_existing(gateway, &cleaned, &original_techs).await
    };
    let mut desc = ensure_exactly_two_sentences(&desc);

    let matched = find_intersection(&desc, job_skills);
    if !matched.is_empty() && !desc.contains(&matched) {
        desc.push_str(&format!(" Bu görevde {matched} yetkinliklerini aktif olarak kullandım."));
    }

    OptimizedItem {
        title: safe(exp.position.as_deref()),
        subtitle: safe(exp.company.as_deref()),
        date: format_date_range(exp.start_date.as_deref(), exp.end_date.as_deref()),
        description: vec![desc],
    }
}

pub async fn optimize_experiences(gateway: &ProviderGateway, profile: &Profile, job_skills: &str) -> Vec<OptimizedItem> {
    let mut items = Vec::with_capacity(profile.experiences.len());
    for exp in &profile.experiences {
        items.push(optimize_experience(gateway, exp, job_skills).await);
    }
    items
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

pub fn project_fallback(rng: &mut impl Rng, project_name: &str, technologies: &str, job_skills: &str) -> String {
    let name = if project_name.is_empty() {
        "Bu projede".to_string()
    } else {
        format!("{project_name} projesinde")
    };
    let opener = pick(rng, &PROJECT_OPENERS).replace("{name}", &name);

    let techs = template_techs(technologies, job_skills);
    let closer = if techs.is_empty() {
        PROJECT_PLAIN_CLOSER.to_string()
    } else {
        pick(rng, &PROJECT_TECH_CLOSERS).replace("{techs}", &techs)
    };
    format!("{opener} {closer}")
}

/// End date shown for a project; ongoing projects have none.
fn project_end(project: &ProjectRow) -> Option<&str> {
    if project.is_ongoing {
        None
    } else {
        project.end_date.as_deref()
    }
}

fn project_details(project: &ProjectRow) -> String {
    let name = safe(Some(project.project_name.as_str()));
    let technologies = safe(project.technologies.as_deref());
    let url = safe(project.url.as_deref());

    let mut lines = vec![format!("Proje Adı: {}", if name.is_empty() { "Bir proje" } else { &name })];
    if !technologies.is_empty() {
        lines.push(format!("Kullanılan Teknolojiler: {technologies}"));
    }
    if !url.is_empty() {
        lines.push(format!("Proje Linki: {url}"));
    }
    lines.push(format!(
        "Tarih: {}",
        format_date_range(project.start_date.as_deref(), project_end(project))
    ));
    lines.join("\n")
}

async fn generate_project_description(
    gateway: &ProviderGateway,
    project: &ProjectRow,
    job_skills: &str,
    original_techs: &str,
) -> String {
    let technologies = safe(project.technologies.as_deref());
    let prompt = PROJECT_PROMPT
        .replace("{details}", &project_details(project))
        .replace("{job_skills}", job_skills)
        .replace("{emphasis}", &tech_emphasis(original_techs, &technologies, job_skills));

    if let Some(desc) = generate_with_ai(gateway, &prompt, "project_description").await {
        return desc;
    }
    let techs = if original_techs.is_empty() { &technologies } else { original_techs };
    project_fallback(
        &mut rand::rng(),
        &safe(Some(project.project_name.as_str())),
        techs,
        job_skills,
    )
}

pub async fn optimize_project(gateway: &ProviderGateway, project: &ProjectRow, job_skills: &str) -> OptimizedItem {
    let original = safe(project.description.as_deref());
    let original_techs = extract_technical_terms(&original);
    let cleaned = clean_description(&original);

    let desc = if needs_generation(&cleaned) {
        generate_project_description(gateway, project, job_skills, &original_techs).await
    } else {
        rewrite_existing(gateway, &cleaned, &original_techs).await
    };

    OptimizedItem {
        title: safe(Some(project.project_name.as_str())),
        subtitle: PROJECT_SUBTITLE.to_string(),
        date: format_date_range(project.start_date.as_deref(), project_end(project)),
        description: vec![ensure_exactly_two_sentences(&desc)],
    }
}

pub async fn optimize_projects(gateway: &ProviderGateway, profile: &Profile, job_skills: &str) -> Vec<OptimizedItem> {
    let mut items = Vec::with_capacity(profile.projects.len());
    for project in &profile.projects {
        items.push(optimize_project(gateway, project, job_skills).await);
    }
    items
}

// ────────────────────────────────────────────────────────────────────────────
// Education, languages, certificates
// ────────────────────────────────────────────────────────────────────────────

async fn clean_field(gateway: &ProviderGateway, value: Option<&str>) -> String {
    let cleaned = clean_description(&safe(value));
    if cleaned.is_empty() {
        return cleaned;
    }
    fix_grammar(gateway, &cleaned).await
}

fn strip_comma_debris(value: &str) -> String {
    let value = COMMA_BRACE_RE.replace_all(value, "");
    TRAILING_COMMA_RE.replace(&value, "").trim().to_string()
}

pub async fn optimize_education(gateway: &ProviderGateway, profile: &Profile) -> Vec<OptimizedEducation> {
    let mut out = Vec::with_capacity(profile.educations.len());
    for edu in &profile.educations {
        let school = clean_field(gateway, Some(edu.school_name.as_str())).await;
        let department = strip_comma_debris(&clean_field(gateway, edu.department.as_deref()).await);
        let degree = strip_comma_debris(&clean_field(gateway, edu.degree.as_deref()).await);

        out.push(OptimizedEducation {
            id: edu.id,
            school_name: if school.is_empty() { UNSPECIFIED_SCHOOL.to_string() } else { school },
            department,
            degree,
            start_year: safe(edu.start_year.as_deref()),
            graduation_year: Some(safe(edu.graduation_year.as_deref())).filter(|y| !y.is_empty()),
            gpa: safe(edu.gpa.as_deref()),
        });
    }
    out
}

pub fn copy_languages(profile: &Profile) -> Vec<OptimizedLanguage> {
    profile
        .languages
        .iter()
        .map(|l| OptimizedLanguage {
            id: l.id,
            language: safe(Some(l.language.as_str())),
            level: safe(l.level.as_deref()),
        })
        .collect()
}

pub fn copy_certificates(profile: &Profile) -> Vec<OptimizedCertificate> {
    profile
        .certificates
        .iter()
        .map(|c| OptimizedCertificate {
            id: c.id,
            name: safe(Some(c.name.as_str())),
            issuer: safe(c.issuer.as_deref()),
            date: safe(c.issue_date.as_deref()),
            url: safe(c.url.as_deref()),
        })
        .collect()
}
