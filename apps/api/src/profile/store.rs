//! Profile persistence. Updates replace every child collection inside one transaction.

use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{
    CertificateRow, EducationRow, ExperienceRow, LanguageRow, Profile, ProfileRow, ProjectRow,
    SkillRow,
};
use crate::models::user::User;

// ────────────────────────────────────────────────────────────────────────────
// Update payload
// ────────────────────────────────────────────────────────────────────────────

/// Technologies arrive either as one string or as a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Technologies {
    Text(String),
    List(Vec<String>),
}

impl Technologies {
    pub fn joined(&self) -> String {
        match self {
            Technologies::Text(text) => text.trim().to_string(),
            Technologies::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillInput {
    pub skill_name: Option<String>,
    pub level: Option<String>,
    pub years: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceInput {
    pub position: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub employment_type: Option<String>,
    pub technologies: Option<Technologies>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationInput {
    pub school_name: Option<String>,
    pub department: Option<String>,
    pub degree: Option<String>,
    pub start_year: Option<String>,
    pub graduation_year: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageInput {
    pub language: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificateInput {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    pub project_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_ongoing: bool,
    pub url: Option<String>,
    pub technologies: Option<Technologies>,
    pub description: Option<String>,
    pub generated_description: Option<String>,
}

/// Full replacement of a profile. Missing lists count as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub department: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub website_url: Option<String>,
    pub total_experience_years: Option<i32>,
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default)]
    pub experiences: Vec<ExperienceInput>,
    #[serde(default)]
    pub educations: Vec<EducationInput>,
    #[serde(default)]
    pub languages: Vec<LanguageInput>,
    #[serde(default)]
    pub certificates: Vec<CertificateInput>,
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl ProjectInput {
    /// Ongoing projects keep no end date.
    fn stored_end_date(&self) -> Option<String> {
        if self.is_ongoing {
            None
        } else {
            self.end_date.clone()
        }
    }

    /// The submitted description, else the generated one, else empty.
    fn stored_description(&self) -> String {
        crate::text::first_non_blank(
            [self.description.as_deref(), self.generated_description.as_deref()],
            "",
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reads
// ────────────────────────────────────────────────────────────────────────────

pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Kullanıcı bulunamadı: {user_id}")))
}

/// Loads the user, the profile row (if any) and every child collection in stored order.
pub async fn load_profile(pool: &PgPool, user_id: Uuid) -> Result<Profile, AppError> {
    let user = find_user(pool, user_id).await?;
    let profile: Option<ProfileRow> =
        sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    let Some(row) = profile else {
        return Ok(Profile {
            user,
            profile: None,
            skills: vec![],
            experiences: vec![],
            educations: vec![],
            languages: vec![],
            certificates: vec![],
            projects: vec![],
        });
    };

    let pid = row.id;
    Ok(Profile {
        skills: sqlx::query_as(
            "SELECT id, skill_name, level, years FROM user_skills WHERE profile_id = $1 ORDER BY sort_order",
        )
        .bind(pid)
        .fetch_all(pool)
        .await?,
        experiences: sqlx::query_as(
            r#"
            SELECT id, position, company, city, employment_type, technologies, start_date, end_date, description
            FROM user_experiences WHERE profile_id = $1 ORDER BY sort_order
            "#,
        )
        .bind(pid)
        .fetch_all(pool)
        .await?,
        educations: sqlx::query_as(
            r#"
            SELECT id, school_name, department, degree, start_year, graduation_year, gpa
            FROM user_educations WHERE profile_id = $1 ORDER BY sort_order
            "#,
        )
        .bind(pid)
        .fetch_all(pool)
        .await?,
        languages: sqlx::query_as(
            "SELECT id, language, level FROM user_languages WHERE profile_id = $1 ORDER BY sort_order",
        )
        .bind(pid)
        .fetch_all(pool)
        .await?,
        certificates: sqlx::query_as(
            "SELECT id, name, issuer, issue_date, url FROM user_certificates WHERE profile_id = $1 ORDER BY sort_order",
        )
        .bind(pid)
        .fetch_all(pool)
        .await?,
        projects: sqlx::query_as(
            r#"
            SELECT id, project_name, start_date, end_date, is_ongoing, url, technologies, description
            FROM user_projects WHERE profile_id = $1 ORDER BY sort_order
            "#,
        )
        .bind(pid)
        .fetch_all(pool)
        .await?,
        user,
        profile: Some(row),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Replace
// ────────────────────────────────────────────────────────────────────────────

/// Writes `update` as the complete profile of `user_id`.
///
/// User fields are only overwritten when present. The profile row is upserted and
/// all six child tables are cleared and re-inserted; nothing is visible until commit.
pub async fn replace_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> Result<Profile, AppError> {
    find_user(pool, user_id).await?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE users SET
            full_name        = COALESCE($2, full_name),
            phone            = COALESCE($3, phone),
            location         = COALESCE($4, location),
            experience_years = COALESCE($5, experience_years)
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(&update.location)
    .bind(update.total_experience_years)
    .execute(&mut *tx)
    .await?;

    let profile_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO profiles
            (id, user_id, title, summary, department, linkedin_url, github_url, website_url,
             total_experience_years, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
        ON CONFLICT (user_id) DO UPDATE SET
            title = EXCLUDED.title,
            summary = EXCLUDED.summary,
            department = EXCLUDED.department,
            linkedin_url = EXCLUDED.linkedin_url,
            github_url = EXCLUDED.github_url,
            website_url = EXCLUDED.website_url,
            total_experience_years = EXCLUDED.total_experience_years,
            updated_at = now()
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&update.title)
    .bind(&update.summary)
    .bind(&update.department)
    .bind(&update.linkedin_url)
    .bind(&update.github_url)
    .bind(&update.website_url)
    .bind(update.total_experience_years)
    .fetch_one(&mut *tx)
    .await?;

    clear_children(&mut tx, profile_id).await?;
    insert_children(&mut tx, profile_id, update).await?;

    tx.commit().await?;
    info!(%user_id, %profile_id, "Profile replaced");

    load_profile(pool, user_id).await
}

const CHILD_TABLES: [&str; 6] = [
    "user_skills",
    "user_experiences",
    "user_educations",
    "user_languages",
    "user_certificates",
    "user_projects",
];

async fn clear_children(tx: &mut Transaction<'_, Postgres>, profile_id: Uuid) -> Result<(), AppError> {
    for table in CHILD_TABLES {
        sqlx::query(&format!("DELETE FROM {table} WHERE profile_id = $1"))
            .bind(profile_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: Uuid,
    update: &ProfileUpdate,
) -> Result<(), AppError> {
    for (order, s) in update.skills.iter().filter(|s| present(&s.skill_name)).enumerate() {
        sqlx::query(
            "INSERT INTO user_skills (id, profile_id, skill_name, level, years, sort_order) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(s.skill_name.as_deref().map(str::trim))
        .bind(&s.level)
        .bind(s.years.unwrap_or(0))
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    for (order, e) in update
        .experiences
        .iter()
        .filter(|e| present(&e.company) || present(&e.position))
        .enumerate()
    {
        sqlx::query(
            r#"
            INSERT INTO user_experiences
                (id, profile_id, position, company, city, employment_type, technologies,
                 start_date, end_date, description, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(&e.position)
        .bind(&e.company)
        .bind(&e.city)
        .bind(&e.employment_type)
        .bind(e.technologies.as_ref().map(Technologies::joined))
        .bind(&e.start_date)
        .bind(&e.end_date)
        .bind(&e.description)
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    for (order, e) in update.educations.iter().filter(|e| present(&e.school_name)).enumerate() {
        sqlx::query(
            r#"
            INSERT INTO user_educations
                (id, profile_id, school_name, department, degree, start_year, graduation_year, gpa, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(&e.school_name)
        .bind(&e.department)
        .bind(&e.degree)
        .bind(&e.start_year)
        .bind(&e.graduation_year)
        .bind(&e.gpa)
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    for (order, l) in update.languages.iter().filter(|l| present(&l.language)).enumerate() {
        sqlx::query(
            "INSERT INTO user_languages (id, profile_id, language, level, sort_order) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(&l.language)
        .bind(&l.level)
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    for (order, c) in update.certificates.iter().filter(|c| present(&c.name)).enumerate() {
        sqlx::query(
            r#"
            INSERT INTO user_certificates (id, profile_id, name, issuer, issue_date, url, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(&c.name)
        .bind(&c.issuer)
        .bind(&c.issue_date)
        .bind(&c.url)
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    for (order, p) in update.projects.iter().filter(|p| present(&p.project_name)).enumerate() {
        sqlx::query(
            r#"
            INSERT INTO user_projects
                (id, profile_id, project_name, start_date, end_date, is_ongoing, url,
                 technologies, description, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(&p.project_name)
        .bind(&p.start_date)
        .bind(p.stored_end_date())
        .bind(p.is_ongoing)
        .bind(&p.url)
        .bind(p.technologies.as_ref().map(Technologies::joined))
        .bind(p.stored_description())
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
