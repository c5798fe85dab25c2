use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::User;
use crate::text::safe;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub department: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub website_url: Option<String>,
    pub total_experience_years: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub skill_name: String,
    pub level: Option<String>,
    pub years: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub position: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub employment_type: Option<String>,
    pub technologies: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub school_name: String,
    pub department: Option<String>,
    pub degree: Option<String>,
    pub start_year: Option<String>,
    pub graduation_year: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LanguageRow {
    pub id: Uuid,
    pub language: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificateRow {
    pub id: Uuid,
    pub name: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub project_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_ongoing: bool,
    pub url: Option<String>,
    pub technologies: Option<String>,
    pub description: Option<String>,
}

/// A user together with their profile and every child collection, in stored order.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user: User,
    pub profile: Option<ProfileRow>,
    pub skills: Vec<SkillRow>,
    pub experiences: Vec<ExperienceRow>,
    pub educations: Vec<EducationRow>,
    pub languages: Vec<LanguageRow>,
    pub certificates: Vec<CertificateRow>,
    pub projects: Vec<ProjectRow>,
}

impl Profile {
    /// Profile title, falling back to the account title.
    pub fn title(&self) -> String {
        let from_profile = self.profile.as_ref().and_then(|p| p.title.as_deref());
        crate::text::first_non_blank([from_profile, self.user.title.as_deref()], "")
    }

    pub fn department(&self) -> String {
        safe(self.profile.as_ref().and_then(|p| p.department.as_deref()))
    }

    pub fn full_name(&self) -> String {
        safe(self.user.full_name.as_deref())
    }

    /// Profile total, then account value, then zero. Negative values clamp to zero.
    pub fn experience_years(&self) -> u32 {
        self.profile
            .as_ref()
            .and_then(|p| p.total_experience_years)
            .or(self.user.experience_years)
            .unwrap_or(0)
            .max(0) as u32
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.skills
            .iter()
            .map(|s| s.skill_name.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_experience_years_prefers_profile_total() {
        let mut p = profile_with_skills(&[], Some(2));
        assert_eq!(p.experience_years(), 2);
        p.profile = Some(super::ProfileRow {
            id: uuid::Uuid::new_v4(),
            user_id: p.user.id,
            title: Some("Backend Developer".into()),
            summary: None,
            department: Some("Bilgisayar Mühendisliği".into()),
            linkedin_url: None,
            github_url: None,
            website_url: None,
            total_experience_years: Some(5),
            updated_at: chrono::Utc::now(),
        });
        assert_eq!(p.experience_years(), 5);
        assert_eq!(p.title(), "Backend Developer");
        assert_eq!(p.department(), "Bilgisayar Mühendisliği");
    }

    #[test]
    fn test_title_falls_back_to_account() {
        let p = profile_with_skills(&[], None);
        assert_eq!(p.title(), "Yazılım Geliştirici");
        assert_eq!(p.experience_years(), 0);
    }
}
