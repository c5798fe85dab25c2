//! Chat-completions providers speaking the OpenAI wire format (Groq, DeepSeek).

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::prompts::GROQ_SYSTEM;
use super::{send_rotating, KeyRing, LlmError, Provider};
use crate::config::ProviderConfig;

const GROQ_TEMPERATURE: f32 = 0.5;
const GROQ_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

pub struct OpenAiCompatProvider {
    name: &'static str,
    client: Client,
    keys: KeyRing,
    url: String,
    model: String,
    system: Option<&'static str>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiCompatProvider {
    /// Groq: Turkish system prompt, moderate temperature, bounded output.
    pub fn groq(client: Client, config: &ProviderConfig) -> Option<Self> {
        Some(Self {
            name: "groq",
            client,
            keys: KeyRing::new(config.keys.clone())?,
            url: config.url.clone(),
            model: config.model.clone(),
            system: Some(GROQ_SYSTEM),
            temperature: Some(GROQ_TEMPERATURE),
            max_tokens: Some(GROQ_MAX_TOKENS),
        })
    }

    /// DeepSeek: plain single-message request.
    pub fn deepseek(client: Client, config: &ProviderConfig) -> Option<Self> {
        Some(Self {
            name: "deepseek",
            client,
            keys: KeyRing::new(config.keys.clone())?,
            url: config.url.clone(),
            model: config.model.clone(),
            system: None,
            temperature: None,
            max_tokens: None,
        })
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        send_rotating(self.name, &self.keys, |key| {
            self.client.post(&self.url).bearer_auth(key).json(&request)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/chat")
    }

    /// Replies by bearer token: `limited-*` → 429, `slow-limited-*` → 429 after 150 ms,
    /// `broken-*` → 500, otherwise a chat envelope echoing the model name. Counts every hit.
    fn fake_chat_api(hits: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/chat",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    if auth.starts_with("Bearer slow-limited") {
                        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
                        return (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": "slow down"})));
                    }
                    if auth.starts_with("Bearer limited") {
                        return (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": "slow down"})));
                    }
                    if auth.starts_with("Bearer broken") {
                        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "down"})));
                    }
                    let model = body["model"].as_str().unwrap_or_default().to_string();
                    (
                        StatusCode::OK,
                        Json(json!({
                            "choices": [{ "message": { "role": "assistant", "content": format!("yanıt: {model}") } }]
                        })),
                    )
                }
            }),
        )
    }

    fn config(url: &str, keys: &[&str]) -> ProviderConfig {
        ProviderConfig {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            model: "test-model".into(),
            url: url.into(),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_key_rotates_to_next() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = spawn_server(fake_chat_api(hits.clone())).await;
        let provider =
            OpenAiCompatProvider::groq(Client::new(), &config(&url, &["limited-1", "good-1"])).unwrap();

        assert_eq!(provider.complete("selam").await.unwrap(), "yanıt: test-model");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_keys_rate_limited() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = spawn_server(fake_chat_api(hits.clone())).await;
        let provider =
            OpenAiCompatProvider::deepseek(Client::new(), &config(&url, &["limited-1", "limited-2"]))
                .unwrap();

        let err = provider.complete("selam").await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { retries: 2 }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_overlapping_calls_each_reach_the_working_key() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = spawn_server(fake_chat_api(hits.clone())).await;
        let provider =
            OpenAiCompatProvider::groq(Client::new(), &config(&url, &["slow-limited-1", "good-1"]))
                .unwrap();

        let first = provider.complete("ilk");
        let second = async {
            tokio::time::sleep(std::time::Duration::from_millis(30)).await;
            provider.complete("ikinci").await
        };
        let (a, b) = tokio::join!(first, second);

        assert_eq!(a.unwrap(), "yanıt: test-model");
        assert_eq!(b.unwrap(), "yanıt: test-model");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_server_error_abandons_provider_without_rotating() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = spawn_server(fake_chat_api(hits.clone())).await;
        let provider =
            OpenAiCompatProvider::groq(Client::new(), &config(&url, &["broken-1", "good-1"])).unwrap();

        let err = provider.complete("selam").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gateway_falls_back_over_http() {
        use crate::llm_client::ProviderGateway;

        let hits = Arc::new(AtomicUsize::new(0));
        let url = spawn_server(fake_chat_api(hits.clone())).await;
        let failing = OpenAiCompatProvider::groq(Client::new(), &config(&url, &["broken-1"])).unwrap();
        let working =
            OpenAiCompatProvider::deepseek(Client::new(), &config(&url, &["good-1"])).unwrap();
        let gateway = ProviderGateway::new(vec![Arc::new(failing) as Arc<dyn Provider>, Arc::new(working)]);

        assert_eq!(gateway.complete("selam").await.unwrap(), "yanıt: test-model");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_groq_request_carries_system_prompt() {
        let request = ChatRequest {
            model: "m",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: GROQ_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: Some(GROQ_TEMPERATURE),
            max_tokens: Some(GROQ_MAX_TOKENS),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["max_tokens"], 4000);
    }

    #[test]
    fn test_deepseek_request_omits_tuning_fields() {
        let request = ChatRequest {
            model: "m",
            messages: vec![],
            temperature: None,
            max_tokens: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
    }
}
