//! Normalizes provider response envelopes into plain text.
//!
//! Two shapes are recognized:
//! - OpenAI-compatible: `choices[0].message.content`
//! - Gemini: `candidates[0].content.parts[0].text`
//!
//! Anything else, including truncated or placeholder JSON, is reported as `None`.
//! The raw body is never returned as text.

use serde_json::Value;
use tracing::warn;

/// Extracts the generated text from a raw response body.
pub fn extract_text(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() || is_only_brackets(trimmed) {
        warn!("response body is blank or bracket-only");
        return None;
    }
    if trimmed.starts_with('{') && !trimmed.contains('}') {
        warn!("response body is unterminated JSON");
        return None;
    }

    let root: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "response body is not valid JSON");
            return None;
        }
    };

    let text = root
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .or_else(|| {
            root.pointer("/candidates/0/content/parts/0/text")
                .and_then(Value::as_str)
        });

    match text {
        Some(t) if !is_degenerate(t) => Some(t.trim().to_string()),
        Some(t) => {
            warn!(content = t.trim(), "extracted content is degenerate");
            None
        }
        None => {
            warn!("unrecognized response envelope");
            None
        }
    }
}

fn is_only_brackets(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | '(' | ')'))
}

fn is_degenerate(text: &str) -> bool {
    let t = text.trim();
    t.chars().count() <= 2 || is_only_brackets(t)
}
