//! Chat turns: prompt assembly, one gateway call, and storage of both sides.

use std::fmt::Write;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::prompts::{CHAT_CLOSING, CHAT_RULES};
use crate::errors::AppError;
use crate::llm_client::ProviderGateway;
use crate::models::chat::{ChatMessageRow, ROLE_ASSISTANT, ROLE_USER};
use crate::models::profile::Profile;
use crate::profile::store::load_profile;

pub const CHAT_UNAVAILABLE: &str =
    "Üzgünüm, şu anda yanıt veremiyorum. Lütfen daha sonra tekrar deneyin.";
/// Messages carried into each prompt.
const CONTEXT_MESSAGES: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub id: Uuid,
    pub message: String,
    pub response: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// `history` must be oldest first.
pub fn build_chat_prompt(profile: &Profile, history: &[ChatMessageRow], question: &str) -> String {
    let mut prompt = String::from(CHAT_RULES);

    if let Some(row) = &profile.profile {
        let _ = writeln!(prompt, "KULLANICI PROFİLİ:");
        let name = crate::text::first_non_blank([profile.user.full_name.as_deref()], "Belirtilmemiş");
        let _ = writeln!(prompt, "- İsim: {name}");
        if let Some(title) = row.title.as_deref().filter(|t| !t.trim().is_empty()) {
            let _ = writeln!(prompt, "- Meslek: {}", title.trim());
        }
        if let Some(years) = row.total_experience_years {
            let _ = writeln!(prompt, "- Deneyim: {years} yıl");
        }
        prompt.push('\n');
    }

    let lines: Vec<String> = history
        .iter()
        .filter(|m| !m.content.trim().is_empty())
        .filter_map(|m| match m.role.as_str() {
            ROLE_USER => Some(format!("Kullanıcı: {}", m.content)),
            ROLE_ASSISTANT => Some(format!("Asistan: {}", m.content)),
            _ => None,
        })
        .collect();
    if !lines.is_empty() {
        let _ = writeln!(prompt, "ÖNCEKİ KONUŞMA GEÇMİŞİ:");
        for line in lines {
            let _ = writeln!(prompt, "{line}");
        }
        prompt.push('\n');
    }

    let _ = writeln!(prompt, "KULLANICININ ŞU ANKİ SORUSU:");
    let _ = writeln!(prompt, "{}\n", question.trim());
    prompt.push_str(CHAT_CLOSING);
    prompt
}

/// The gateway's answer, or the fixed apology when it fails or stays silent.
pub async fn answer(gateway: &ProviderGateway, prompt: &str) -> String {
    gateway
        .try_complete(prompt, "chat")
        .await
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| CHAT_UNAVAILABLE.to_string())
}

/// The last `CONTEXT_MESSAGES` messages, oldest first.
pub async fn recent_messages(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatMessageRow>, AppError> {
    Ok(sqlx::query_as::<_, ChatMessageRow>(
        r#"
        SELECT * FROM (
            SELECT * FROM chat_messages WHERE user_id = $1
            ORDER BY created_at DESC LIMIT $2
        ) recent
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(CONTEXT_MESSAGES)
    .fetch_all(pool)
    .await?)
}

pub async fn history(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatMessageRow>, AppError> {
    Ok(sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn clear_history(pool: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
    let deleted = sqlx::query("DELETE FROM chat_messages WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();
    info!(%user_id, deleted, "chat history cleared");
    Ok(deleted)
}

pub async fn send_message(
    pool: &PgPool,
    gateway: &ProviderGateway,
    user_id: Uuid,
    message: &str,
) -> Result<ChatReply, AppError> {
    let profile = load_profile(pool, user_id).await?;
    let context = recent_messages(pool, user_id).await?;
    let prompt = build_chat_prompt(&profile, &context, message);
    debug!(len = prompt.len(), "chat prompt built");

    let response = answer(gateway, &prompt).await;

    // Explicit timestamps keep the question ordered before its answer.
    let asked_at = Utc::now();
    let answered_at = asked_at + Duration::milliseconds(1);

    let mut tx = pool.begin().await?;
    insert_message(&mut tx, user_id, ROLE_USER, message, asked_at).await?;
    let id = insert_message(&mut tx, user_id, ROLE_ASSISTANT, &response, answered_at).await?;
    tx.commit().await?;
    info!(%user_id, response_len = response.len(), "chat turn stored");

    Ok(ChatReply {
        id,
        message: message.to_string(),
        response,
        role: ROLE_ASSISTANT.to_string(),
        created_at: answered_at,
    })
}

async fn insert_message(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    role: &str,
    content: &str,
    created_at: DateTime<Utc>,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO chat_messages (id, user_id, role, content, created_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(user_id)
    .bind(role)
    .bind(content)
    .bind(created_at)
    .execute(&mut **tx)
    .await?;
    Ok(id)
}
