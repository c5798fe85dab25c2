//! CV translation: the model rewrites only the string values of an arbitrary JSON document.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::TRANSLATION_PROMPT;
use crate::llm_client::{parse_json_lenient, ProviderGateway};

/// `en` is spelled out for the model; any other code is passed through verbatim.
pub fn language_name(code: &str) -> String {
    let code = code.trim();
    if code.eq_ignore_ascii_case("en") {
        "English".to_string()
    } else {
        code.to_string()
    }
}

/// Parses the model reply, digging the object out of fences or prose; only a JSON
/// object is accepted.
pub fn parse_translation(reply: &str) -> Result<Value, AppError> {
    match parse_json_lenient::<Value>(reply) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) | Err(_) => {
            warn!(len = reply.len(), "translation reply is not a JSON object");
            Err(AppError::Validation("Çeviri yapılamadı: AI yanıtı JSON formatında değil.".to_string()))
        }
    }
}

pub async fn translate_cv(gateway: &ProviderGateway, cv: &Value, lang: &str) -> Result<Value, AppError> {
    if lang.trim().is_empty() {
        return Err(AppError::Validation("lang cannot be empty".to_string()));
    }
    let json = serde_json::to_string(cv).map_err(|e| AppError::Internal(e.into()))?;
    let prompt = TRANSLATION_PROMPT
        .replace("{language}", &language_name(lang))
        .replace("{json}", &json);

    info!(lang, "translating CV");
    let reply = gateway.complete(&prompt).await?;
    parse_translation(&reply)
}
