//! Gemini `generateContent` provider. The key travels as a query parameter.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::{send_rotating, KeyRing, LlmError, Provider};
use crate::config::ProviderConfig;

pub struct GeminiProvider {
    client: Client,
    keys: KeyRing,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Option<Self> {
        let keys = KeyRing::new(config.keys.clone())?;
        let model = config.model.trim_start_matches("models/");
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.url.trim_end_matches('/'),
            model
        );
        Some(Self {
            client,
            keys,
            endpoint,
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        send_rotating(self.name(), &self.keys, |key| {
            self.client
                .post(&self.endpoint)
                .query(&[("key", key)])
                .json(&body)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::post, Json, Router};
    use serde_json::Value;
    use std::collections::HashMap;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_gemini_posts_to_model_endpoint_and_rotates_on_429() {
        let app = Router::new().route(
            "/models/:action",
            post(
                |axum::extract::Path(action): axum::extract::Path<String>,
                 Query(q): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(action, "gemini-test:generateContent");
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "merhaba");
                    if q.get("key").map(String::as_str) == Some("limited-key") {
                        return (axum::http::StatusCode::TOO_MANY_REQUESTS, Json(json!({})));
                    }
                    (
                        axum::http::StatusCode::OK,
                        Json(json!({
                            "candidates": [{ "content": { "parts": [{ "text": "Gemini yanıtı" }] } }]
                        })),
                    )
                },
            ),
        );
        let base = spawn_server(app).await;

        let provider = GeminiProvider::new(
            Client::new(),
            &ProviderConfig {
                keys: vec!["limited-key".into(), "working-key".into()],
                model: "models/gemini-test".into(),
                url: format!("{base}/"),
            },
        )
        .unwrap();

        assert_eq!(provider.complete("merhaba").await.unwrap(), "Gemini yanıtı");
    }

    #[test]
    fn test_gemini_requires_keys() {
        let config = ProviderConfig {
            keys: vec![],
            model: "gemini-2.5-flash".into(),
            url: "http://localhost".into(),
        };
        assert!(GeminiProvider::new(Client::new(), &config).is_none());
    }
}
