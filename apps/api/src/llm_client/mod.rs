//! LLM client: the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call a provider API directly.
//! All LLM interactions MUST go through `ProviderGateway`.
//!
//! Providers are tried in fixed priority order (Gemini → Groq → DeepSeek). Inside a
//! provider, credentials rotate round-robin on HTTP 429; any other failure abandons
//! the provider and moves on to the next one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

pub mod envelope;
pub mod gemini;
pub mod openai_compat;
pub mod prompts;

use gemini::GeminiProvider;
use openai_compat::OpenAiCompatProvider;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
/// Upper bound on provider error bodies kept in `LlmError::Api`.
const MAX_ERROR_BODY: usize = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("All {retries} credentials rate limited")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("AI service unreachable")]
    Unavailable,
}

/// A text-generation backend. Implementations own their credentials and
/// envelope format and return plain text or an error.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Credential rotation
// ────────────────────────────────────────────────────────────────────────────

/// Round-robin credential list shared across concurrent requests.
#[derive(Debug)]
pub struct KeyRing {
    keys: Vec<String>,
    index: AtomicUsize,
}

impl KeyRing {
    /// Returns `None` for an empty list so a provider cannot exist without credentials.
    pub fn new(keys: Vec<String>) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }
        Some(Self {
            keys,
            index: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Every credential exactly once, starting at the next round-robin slot.
    ///
    /// The shared cursor advances once per call, so overlapping calls spread their
    /// starting keys without stealing retries from each other.
    pub fn rotation(&self) -> impl Iterator<Item = &str> + '_ {
        let start = self.index.fetch_add(1, Ordering::Relaxed);
        let len = self.keys.len();
        (0..len).map(move |i| self.keys[(start + i) % len].as_str())
    }
}

/// Sends one request per credential until a non-429 answer arrives.
///
/// 429 rotates to the next key. Any other non-success status ends the provider with
/// `LlmError::Api`. A success is run through `envelope::extract_text`.
pub(crate) async fn send_rotating<F>(
    provider: &str,
    ring: &KeyRing,
    build: F,
) -> Result<String, LlmError>
where
    F: Fn(&str) -> RequestBuilder,
{
    for key in ring.rotation() {
        let response = build(key).send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            warn!(provider, key = %mask_key(key), "rate limited, rotating credential");
            continue;
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        debug!(provider, body_len = body.len(), "provider responded");
        return envelope::extract_text(&body).ok_or(LlmError::EmptyContent);
    }

    Err(LlmError::RateLimited {
        retries: ring.len() as u32,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

/// Ordered provider chain used by every service in the application.
#[derive(Clone)]
pub struct ProviderGateway {
    providers: Arc<Vec<Arc<dyn Provider>>>,
}

impl ProviderGateway {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// Builds the Gemini → Groq → DeepSeek chain, skipping providers without keys.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = build_http_client()?;
        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

        match GeminiProvider::new(client.clone(), &config.gemini) {
            Some(p) => providers.push(Arc::new(p)),
            None => warn!("No Gemini API keys configured, provider disabled"),
        }
        match OpenAiCompatProvider::groq(client.clone(), &config.groq) {
            Some(p) => providers.push(Arc::new(p)),
            None => warn!("No Groq API keys configured, provider disabled"),
        }
        match OpenAiCompatProvider::deepseek(client, &config.deepseek) {
            Some(p) => providers.push(Arc::new(p)),
            None => warn!("No DeepSeek API keys configured, provider disabled"),
        }

        let gateway = Self::new(providers);
        info!("Provider gateway ready: [{}]", gateway.provider_names().join(" → "));
        Ok(gateway)
    }

    /// Provider names in call order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Returns the first non-empty completion in priority order.
    ///
    /// A blank prompt yields an empty string without contacting any provider.
    /// When every provider fails the result is `LlmError::Unavailable`.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if prompt.trim().is_empty() {
            warn!("complete called with a blank prompt");
            return Ok(String::new());
        }

        for provider in self.providers.iter() {
            match provider.complete(prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(provider = provider.name(), len = text.len(), "completion succeeded");
                    return Ok(text);
                }
                Ok(_) => warn!(provider = provider.name(), "empty completion, trying next provider"),
                Err(e) => warn!(provider = provider.name(), error = %e, "provider failed, trying next"),
            }
        }

        warn!("all providers failed");
        Err(LlmError::Unavailable)
    }

    /// Like `complete`, but a failure is logged as a degradation and mapped to `None`.
    /// `purpose` names the caller in the log line.
    pub async fn try_complete(&self, prompt: &str, purpose: &str) -> Option<String> {
        match self.complete(prompt).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!(purpose, "AI returned nothing, using fallback");
                None
            }
            Err(e) => {
                warn!(purpose, error = %e, "AI unavailable, using fallback");
                None
            }
        }
    }

    /// Calls the gateway and deserializes the text response as JSON.
    /// Code fences and surrounding prose are tolerated.
    pub async fn complete_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let text = self.complete(prompt).await?;
        parse_json_lenient(&text)
    }
}

/// Parses `text` as JSON, first verbatim (fences stripped) and then from the
/// outermost `{ ... }` span.
pub fn parse_json_lenient<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let stripped = strip_json_fences(text);
    match serde_json::from_str(stripped) {
        Ok(v) => Ok(v),
        Err(e) => match extract_json_object(stripped) {
            Some(object) => serde_json::from_str(object).map_err(LlmError::Parse),
            None => Err(LlmError::Parse(e)),
        },
    }
}

pub fn build_http_client() -> anyhow::Result<Client> {
    Ok(Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the span from the first `{` through the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// `abcd...wxyz`, or `****` for keys too short to reveal anything.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Test doubles for services that sit on top of the gateway.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    type Responder = dyn Fn(&str) -> Option<String> + Send + Sync;

    /// Answers each prompt through a closure and keeps every prompt it saw.
    /// `None` from the closure is reported as a provider failure.
    pub struct ScriptedProvider {
        respond: Box<Responder>,
        pub prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.respond)(prompt).ok_or(LlmError::Api {
                status: 500,
                message: "scripted failure".into(),
            })
        }
    }

    /// A gateway whose single provider answers through `respond`.
    pub fn scripted(
        respond: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> (ProviderGateway, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider {
            respond: Box::new(respond),
            prompts: prompts.clone(),
        };
        (ProviderGateway::new(vec![Arc::new(provider)]), prompts)
    }

    /// A gateway with no providers: every call fails with `Unavailable`.
    pub fn offline() -> ProviderGateway {
        ProviderGateway::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records its name into a shared log and replies with a fixed outcome.
    struct FakeProvider {
        name: &'static str,
        reply: Result<&'static str, u16>,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Provider for FakeProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(self.name);
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(LlmError::Api {
                    status,
                    message: "boom".into(),
                }),
            }
        }
    }

    fn gateway(
        replies: &[(&'static str, Result<&'static str, u16>)],
    ) -> (ProviderGateway, Arc<Mutex<Vec<&'static str>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let providers = replies
            .iter()
            .map(|&(name, reply)| {
                Arc::new(FakeProvider {
                    name,
                    reply,
                    calls: calls.clone(),
                }) as Arc<dyn Provider>
            })
            .collect();
        (ProviderGateway::new(providers), calls)
    }

    #[tokio::test]
    async fn test_falls_back_to_second_provider_after_server_error() {
        let (gw, calls) = gateway(&[("a", Err(500)), ("b", Ok("from b"))]);
        assert_eq!(gw.complete("hello").await.unwrap(), "from b");
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let (gw, calls) = gateway(&[("a", Ok("from a")), ("b", Ok("from b"))]);
        assert_eq!(gw.complete("hello").await.unwrap(), "from a");
        assert_eq!(*calls.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_empty_text_counts_as_failure() {
        let (gw, _) = gateway(&[("a", Ok("   ")), ("b", Ok("real answer"))]);
        assert_eq!(gw.complete("hello").await.unwrap(), "real answer");
    }

    #[tokio::test]
    async fn test_all_providers_failing_is_terminal() {
        let (gw, calls) = gateway(&[("a", Err(500)), ("b", Err(401)), ("c", Err(503))]);
        assert!(matches!(gw.complete("hello").await, Err(LlmError::Unavailable)));
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_no_providers_is_terminal() {
        let gw = ProviderGateway::new(Vec::new());
        assert!(matches!(gw.complete("hello").await, Err(LlmError::Unavailable)));
        assert!(gw.try_complete("hello", "test").await.is_none());
    }

    #[tokio::test]
    async fn test_blank_prompt_skips_providers() {
        let (gw, calls) = gateway(&[("a", Ok("never"))]);
        assert_eq!(gw.complete("  \n").await.unwrap(), "");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_json_tolerates_fences_and_prose() {
        let (gw, _) = gateway(&[("a", Ok("Sure! ```json\n{\"skills\": [\"rust\"]}\n``` done"))]);
        let value: serde_json::Value = gw.complete_json("give json").await.unwrap();
        assert_eq!(value["skills"][0], "rust");
    }

    #[test]
    fn test_key_ring_round_robin() {
        let ring = KeyRing::new(vec!["k1".into(), "k2".into(), "k3".into()]).unwrap();
        let first: Vec<&str> = ring.rotation().collect();
        let second: Vec<&str> = ring.rotation().collect();
        assert_eq!(first, vec!["k1", "k2", "k3"]);
        assert_eq!(second, vec!["k2", "k3", "k1"]);
    }

    #[test]
    fn test_key_ring_interleaved_rotations_cover_every_key() {
        let ring = KeyRing::new(vec!["k1".into(), "k2".into()]).unwrap();
        let mut a = ring.rotation();
        let mut b = ring.rotation();
        let a_first = a.next().unwrap();
        let b_first = b.next().unwrap();
        let mut a_all = vec![a_first, a.next().unwrap()];
        let mut b_all = vec![b_first, b.next().unwrap()];
        a_all.sort();
        b_all.sort();
        assert_eq!(a_all, vec!["k1", "k2"]);
        assert_eq!(b_all, vec!["k1", "k2"]);
        assert!(a.next().is_none());
    }

    #[test]
    fn test_key_ring_rejects_empty_list() {
        assert!(KeyRing::new(Vec::new()).is_none());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(mask_key("short"), "****");
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("x {\"a\":{\"b\":1}} y"), Some("{\"a\":{\"b\":1}}"));
        assert_eq!(extract_json_object("no json"), None);
        assert_eq!(extract_json_object("} reversed {"), None);
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
