//! User account persistence.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub experience_years: Option<i32>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

impl NewUser {
    /// Trimmed e-mail, or a validation error when e-mail or password is blank.
    pub fn validated_email(&self) -> Result<String, AppError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation("E-posta ve şifre zorunludur.".to_string()));
        }
        Ok(email.to_string())
    }
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.trim())
        .fetch_optional(pool)
        .await?)
}

// TODO: hash passwords with argon2 once clients stop relying on plain-text comparison.
pub async fn insert_user(pool: &PgPool, new: &NewUser) -> Result<User, AppError> {
    let email = new.validated_email()?;
    if find_by_email(pool, &email).await?.is_some() {
        return Err(duplicate(&email));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users
            (id, email, password, full_name, title, experience_years, summary, location, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&new.password)
    .bind(&new.full_name)
    .bind(&new.title)
    .bind(new.experience_years)
    .bind(&new.summary)
    .bind(&new.location)
    .bind(&new.phone)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => duplicate(&email),
        _ => AppError::Database(e),
    })?;

    info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// The user when `password` matches the stored one.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<User, AppError> {
    let invalid = || AppError::Unauthorized("E-posta veya şifre hatalı.".to_string());
    let user = find_by_email(pool, email).await?.ok_or_else(invalid)?;
    if user.password != password {
        return Err(invalid());
    }
    info!(user_id = %user.id, "login succeeded");
    Ok(user)
}

fn duplicate(email: &str) -> AppError {
    AppError::Conflict(format!("Bu e-posta ile kayıtlı kullanıcı zaten var: {email}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_email_requires_both_fields() {
        let mut new = NewUser {
            email: "  ayse@example.com ".into(),
            password: "gizli".into(),
            ..NewUser::default()
        };
        assert_eq!(new.validated_email().unwrap(), "ayse@example.com");

        new.password.clear();
        assert!(matches!(new.validated_email(), Err(AppError::Validation(_))));

        let blank = NewUser {
            email: "   ".into(),
            password: "gizli".into(),
            ..NewUser::default()
        };
        assert!(matches!(blank.validated_email(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_new_user_accepts_partial_body() {
        let new: NewUser = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(new.email, "a@b.c");
        assert!(new.password.is_empty());
        assert!(new.full_name.is_none());
    }
}
