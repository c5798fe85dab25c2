use anyhow::{Context, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";
const DEFAULT_DEEPSEEK_URL: &str = "https://api.deepseek.com/chat/completions";

/// Credentials and endpoint for a single text-generation provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub keys: Vec<String>,
    pub model: String,
    pub url: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing. Provider keys are optional:
/// a provider without keys is skipped by the gateway.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub gemini: ProviderConfig,
    pub groq: ProviderConfig,
    pub deepseek: ProviderConfig,
    /// Optional JSON file replacing the built-in skill keyword table.
    pub skill_table_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini: provider_from_env("GEMINI", DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL),
            groq: provider_from_env("GROQ", DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL),
            deepseek: provider_from_env("DEEPSEEK", DEFAULT_DEEPSEEK_MODEL, DEFAULT_DEEPSEEK_URL),
            skill_table_path: std::env::var("SKILL_TABLE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads `{PREFIX}_API_KEYS`, `{PREFIX}_MODEL` and `{PREFIX}_API_URL`.
fn provider_from_env(prefix: &str, default_model: &str, default_url: &str) -> ProviderConfig {
    ProviderConfig {
        keys: parse_keys(&std::env::var(format!("{prefix}_API_KEYS")).unwrap_or_default()),
        model: optional_env(&format!("{prefix}_MODEL"), default_model),
        url: optional_env(&format!("{prefix}_API_URL"), default_url),
    }
}

/// Splits a comma-separated key list, trimming entries and dropping blanks.
pub fn parse_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_trims_and_drops_blanks() {
        assert_eq!(parse_keys(" a1 , ,b2,,c3 "), vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn test_parse_keys_empty_input() {
        assert!(parse_keys("").is_empty());
        assert!(parse_keys(" , ").is_empty());
    }
}
