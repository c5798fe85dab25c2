//! Job posting persistence.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobPostingRow;

/// Columns written when a posting is first analyzed.
#[derive(Debug, Clone, Default)]
pub struct NewJobPosting {
    pub url: String,
    pub raw_text: String,
    pub cleaned_text: String,
    pub position: String,
    pub company: String,
    pub location: String,
    pub work_type: String,
    pub experience_level: String,
    pub required_skills: String,
    pub responsibilities: String,
    pub analysis_report: String,
}

pub async fn insert_posting(
    pool: &PgPool,
    user_id: Uuid,
    posting: &NewJobPosting,
) -> Result<JobPostingRow, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        r#"
        INSERT INTO job_postings
            (id, user_id, url, raw_text, cleaned_text, position, company, location,
             work_type, experience_level, required_skills, responsibilities, analysis_report)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&posting.url)
    .bind(&posting.raw_text)
    .bind(&posting.cleaned_text)
    .bind(&posting.position)
    .bind(&posting.company)
    .bind(&posting.location)
    .bind(&posting.work_type)
    .bind(&posting.experience_level)
    .bind(&posting.required_skills)
    .bind(&posting.responsibilities)
    .bind(&posting.analysis_report)
    .fetch_one(pool)
    .await?)
}

/// A user's postings, newest first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        "SELECT * FROM job_postings WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn latest_for_user(pool: &PgPool, user_id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        "SELECT * FROM job_postings WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// Escapes LIKE metacharacters so `area` only ever matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Newest postings whose position contains `area`, case-insensitively.
pub async fn top_by_position(
    pool: &PgPool,
    area: &str,
    limit: i64,
) -> Result<Vec<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        r#"
        SELECT * FROM job_postings
        WHERE position ILIKE '%' || $1 || '%' ESCAPE '\'
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(escape_like(area))
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

/// Newest postings mentioning `area` in position, skills or text.
pub async fn top_by_content(
    pool: &PgPool,
    area: &str,
    limit: i64,
) -> Result<Vec<JobPostingRow>, AppError> {
    Ok(sqlx::query_as::<_, JobPostingRow>(
        r#"
        SELECT * FROM job_postings
        WHERE position ILIKE '%' || $1 || '%' ESCAPE '\'
           OR required_skills ILIKE '%' || $1 || '%' ESCAPE '\'
           OR cleaned_text ILIKE '%' || $1 || '%' ESCAPE '\'
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(escape_like(area))
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("%"), "\\%");
        assert_eq!(escape_like("_"), "\\_");
        assert_eq!(escape_like(r"C:\dev"), r"C:\\dev");
        assert_eq!(escape_like("100%_done"), r"100\%\_done");
    }

    #[test]
    fn test_escape_like_keeps_plain_text() {
        assert_eq!(escape_like("Yazılım Geliştirme"), "Yazılım Geliştirme");
        assert_eq!(escape_like("C# .NET"), "C# .NET");
    }
}
