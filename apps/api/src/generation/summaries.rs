//! Tailored professional summaries: two deterministic templates followed by five AI
//! summaries written from different angles.

use tracing::{info, warn};

use crate::generation::prompts::{SUMMARY_PERSPECTIVES, SUMMARY_PROMPT};
use crate::llm_client::ProviderGateway;
use crate::models::profile::Profile;
use crate::profile::context::summary_context;
use crate::sanitizer::{clean_ai_text, ensure_sentence_count};
use crate::text::{safe, title_case};

pub const SUMMARY_COUNT: usize = 7;
const AI_SUMMARY_COUNT: usize = 5;
/// Cleaned AI summaries this short are rejected.
const MIN_AI_SUMMARY_CHARS: usize = 100;
const SKILL_PREVIEW: usize = 5;
const NO_SKILLS: &str = "Mesleki Yetkinlikler";

/// Values every template is filled with.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFacts {
    pub title: String,
    pub years: u32,
    /// Up to five profile skills, comma-joined.
    pub skills: String,
    /// Distinct experience positions, comma-joined. May be empty.
    pub experience_areas: String,
}

impl SummaryFacts {
    pub fn from_profile(profile: &Profile) -> Self {
        let names = profile.skill_names();
        let skills = if names.is_empty() {
            NO_SKILLS.to_string()
        } else {
            names.iter().take(SKILL_PREVIEW).cloned().collect::<Vec<_>>().join(", ")
        };
        Self {
            title: title_case(&profile.title()),
            years: profile.experience_years(),
            skills,
            experience_areas: experience_areas(profile),
        }
    }

    fn year_text(&self) -> String {
        if self.years > 0 {
            format!("{} yıl", self.years)
        } else {
            "Yeni mezun".to_string()
        }
    }
}

/// Positions longer than three characters, first occurrence order.
pub fn experience_areas(profile: &Profile) -> String {
    let mut areas: Vec<String> = Vec::new();
    for exp in &profile.experiences {
        let position = safe(exp.position.as_deref());
        if position.chars().count() > 3 && !areas.contains(&position) {
            areas.push(position);
        }
    }
    areas.join(", ")
}

/// Experience-focused template.
pub fn experience_template(f: &SummaryFacts) -> String {
    let areas = if f.experience_areas.is_empty() {
        "çeşitli projeler"
    } else {
        f.experience_areas.as_str()
    };
    format!(
        "{years} deneyime sahip bir {title} olarak, {skills} konularında derinlemesine bilgi ve pratik deneyim kazandım. \
Kariyerim boyunca {areas} üzerinde çalışarak teknik yetkinliğimi sürekli geliştirdim. \
Özellikle {skills} alanlarında uzmanlaşmış durumdayım ve bu yetkinliklerimi yeni projelerde etkin bir şekilde kullanabilirim. \
Takım çalışmasına yatkın, problem çözme odaklı ve sürekli öğrenmeye açık bir profesyonel olarak, \
organizasyonlara değer katmayı ve başarılı sonuçlar elde etmeyi hedefliyorum. \
Karmaşık teknik problemleri analiz edip çözümler üretebilme yeteneği kazandım ve bu yeteneğimi çeşitli projelerde uyguladım. \
Proje yönetimi konusunda deneyimliyim ve ekip içi koordinasyonu sağlayabilirim. \
Teknik bilgimin yanı sıra, iletişim becerilerim ve ekip çalışmasına olan yatkınlığım ile \
projelerin başarıyla tamamlanmasına katkı sağlayabilirim. \
Yeni teknolojilere adapte olma konusunda hızlıyım ve sürekli kendimi geliştirmeye devam ediyorum. \
Detaylara dikkat eden, analitik düşünebilen ve sonuç odaklı çalışan bir profesyonel olarak, \
verilen görevleri en iyi şekilde yerine getirmeyi hedefliyorum. \
Sürekli öğrenme ve gelişim konusunda istekliyim ve yeni teknolojilere hızlı adapte olabilirim. \
Kariyerim boyunca edindiğim deneyimler sayesinde, farklı projelerde başarılı sonuçlar elde ettim. \
Organizasyonlara değer katmayı ve kariyerimde ilerlemeyi hedefliyorum.",
        years = f.year_text(),
        title = f.title,
        skills = f.skills,
    )
}

/// Career-development template.
pub fn career_template(f: &SummaryFacts) -> String {
    let areas = if f.experience_areas.is_empty() {
        "farklı sektörlerde".to_string()
    } else {
        format!("{} alanlarında", f.experience_areas)
    };
    format!(
        "{years} profesyonel deneyime sahip bir {title} olarak, {areas} çalışma fırsatı buldum. \
Bu süreçte {skills} teknolojilerinde ve metodolojilerinde derinlemesine bilgi edindim. \
Kariyerim boyunca edindiğim deneyimler sayesinde, karmaşık problemleri analiz edip çözümler üretebilme, \
projeleri zamanında ve kaliteli bir şekilde teslim edebilme yeteneği kazandım. \
Teknik bilgimin yanı sıra, iletişim becerilerim ve ekip çalışmasına olan yatkınlığım ile \
organizasyonlara katkı sağlamayı hedefliyorum. \
Problem çözme konusunda güçlü bir altyapıya sahibim ve karmaşık teknik sorunları çözebilirim. \
{skills} teknolojilerinde uzmanlaşmış durumdayım ve bu yetkinliklerimi yeni projelerde etkin bir şekilde kullanabilirim. \
Takım çalışması ve iletişim becerilerim sayesinde, projelerin başarıyla tamamlanmasına katkı sağlayabilirim. \
Sürekli öğrenme ve gelişim konusunda istekliyim ve yeni teknolojilere hızlı adapte olabilirim. \
Detaylara dikkat eden, analitik düşünebilen ve sonuç odaklı çalışan bir profesyonel olarak, \
verilen görevleri en iyi şekilde yerine getirmeyi hedefliyorum. \
Kariyerim boyunca sürekli öğrenme ve gelişim konusunda istekli oldum ve yeni teknolojilere hızlı adapte oldum. \
Farklı projelerde yer alarak deneyimlerimi artırdım ve teknik yetkinliğimi sürekli geliştirdim. \
Organizasyonlara değer katmayı ve kariyerimde ilerlemeyi hedefliyorum.",
        years = f.year_text(),
        title = f.title,
        skills = f.skills,
    )
}

/// Stand-in for a rejected AI summary; alternates between two texts by `index`.
pub fn fallback_summary(f: &SummaryFacts, index: usize) -> String {
    let years = f.year_text();
    let (title, skills) = (&f.title, &f.skills);
    if index % 2 == 0 {
        format!(
            "{years} deneyime sahip bir {title} olarak, {skills} konularında derinlemesine bilgi ve pratik deneyim kazandım. \
Kariyerim boyunca çeşitli projelerde yer alarak teknik yetkinliğimi sürekli geliştirdim. \
Özellikle {skills} teknolojilerinde uzmanlaşmış durumdayım ve bu yetkinliklerimi yeni projelerde etkin bir şekilde kullanabilirim. \
Karmaşık problemleri analiz edip çözümler üretebilme, projeleri zamanında ve kaliteli bir şekilde teslim edebilme yeteneği kazandım. \
Takım çalışmasına yatkın, problem çözme odaklı ve sürekli öğrenmeye açık bir profesyonel olarak, \
organizasyonlara değer katmayı ve başarılı sonuçlar elde etmeyi hedefliyorum. \
Teknik bilgimin yanı sıra, iletişim becerilerim ve ekip çalışmasına olan yatkınlığım ile \
projelerin başarıyla tamamlanmasına katkı sağlayabilirim. \
Yeni teknolojilere adapte olma konusunda hızlıyım ve sürekli kendimi geliştirmeye devam ediyorum."
        )
    } else {
        format!(
            "{years} profesyonel deneyime sahip bir {title} olarak, {skills} teknolojilerinde uzmanlaşmış durumdayım. \
Kariyerim boyunca edindiğim deneyimler sayesinde, karmaşık problemleri analiz edip çözümler üretebilme, \
projeleri zamanında ve kaliteli bir şekilde teslim edebilme yeteneği kazandım. \
{skills} konularında derinlemesine bilgi ve pratik deneyim kazandım. \
Proje yönetimi konusunda deneyimliyim ve ekip içi koordinasyonu sağlayabilirim. \
Teknik bilgimin yanı sıra, iletişim becerilerim ve ekip çalışmasına olan yatkınlığım ile \
organizasyonlara katkı sağlamayı hedefliyorum. \
Sürekli öğrenme ve gelişim konusunda istekliyim ve yeni teknolojilere hızlı adapte olabilirim. \
Detaylara dikkat eden, analitik düşünebilen ve sonuç odaklı çalışan bir profesyonel olarak, \
verilen görevleri en iyi şekilde yerine getirmeyi hedefliyorum."
        )
    }
}

/// Sentence bounds per perspective: the first two are long-form.
fn sentence_bounds(index: usize) -> (usize, usize) {
    if index < 2 {
        (15, 20)
    } else {
        (10, 12)
    }
}

async fn ai_summary(gateway: &ProviderGateway, base_prompt: &str, index: usize) -> Option<String> {
    let prompt = format!("{base_prompt}\n\nÖZEL TALİMAT: {}", SUMMARY_PERSPECTIVES[index]);
    let raw = gateway.try_complete(&prompt, "cv_summary").await?;
    let (min, max) = sentence_bounds(index);
    let cleaned = ensure_sentence_count(&clean_ai_text(&raw), min, max);
    if cleaned.chars().count() > MIN_AI_SUMMARY_CHARS {
        Some(cleaned)
    } else {
        warn!(index, len = cleaned.len(), "AI summary too short after cleaning, discarded");
        None
    }
}

/// Exactly seven summaries: both templates, then accepted AI summaries in perspective
/// order, then fallbacks for whatever was rejected.
pub async fn tailored_summaries(
    gateway: &ProviderGateway,
    profile: &Profile,
    job_context: &str,
) -> Vec<String> {
    let facts = SummaryFacts::from_profile(profile);
    let base_prompt = SUMMARY_PROMPT
        .replace("{profile}", &summary_context(profile))
        .replace("{job}", job_context);

    let (s0, s1, s2, s3, s4) = tokio::join!(
        ai_summary(gateway, &base_prompt, 0),
        ai_summary(gateway, &base_prompt, 1),
        ai_summary(gateway, &base_prompt, 2),
        ai_summary(gateway, &base_prompt, 3),
        ai_summary(gateway, &base_prompt, 4),
    );
    let mut ai: Vec<String> = [s0, s1, s2, s3, s4].into_iter().flatten().collect();
    info!(accepted = ai.len(), "AI summaries generated");
    while ai.len() < AI_SUMMARY_COUNT {
        ai.push(fallback_summary(&facts, ai.len()));
    }

    let mut summaries = vec![experience_template(&facts), career_template(&facts)];
    summaries.extend(ai);
    summaries
}
