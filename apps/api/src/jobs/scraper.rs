//! Job page fetching. The analysis pipeline only sees the `JobScraper` trait so tests can
//! substitute canned pages.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Blocks shorter than this are navigation or labels, not a posting body.
const MIN_BLOCK_LEN: usize = 50;

const CONTENT_SELECTORS: &[&str] = &[
    ".jobs-description__container",
    ".jobs-box__html-content",
    ".description__text",
    "[data-test-id='job-description']",
    "[class*='job-description']",
    "[class*='jobDescription']",
    "[class*='description']",
    "article",
    "main",
];

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Text pulled from a job page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedPage {
    pub title: String,
    /// The posting body when a known container was found.
    pub job_content: String,
    /// Every visible text node of the page.
    pub full_text: String,
}

impl ScrapedPage {
    /// `job_content`, else `full_text`.
    pub fn content(&self) -> &str {
        if self.job_content.trim().is_empty() {
            &self.full_text
        } else {
            &self.job_content
        }
    }
}

#[async_trait]
pub trait JobScraper: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ScrapedPage>;
}

/// Fetches pages over HTTP and extracts text with CSS selectors.
pub struct HttpJobScraper {
    client: Client,
}

impl HttpJobScraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("Failed to build scraper HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JobScraper for HttpJobScraper {
    async fn fetch(&self, url: &str) -> Result<ScrapedPage> {
        info!("Fetching job post: {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch job post")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;
        let page = extract_page(&html);
        if page.job_content.is_empty() {
            warn!(url, "no posting container found, using full page text");
        }
        Ok(page)
    }
}

/// Pure HTML → text extraction.
pub fn extract_page(html: &str) -> ScrapedPage {
    let document = Html::parse_document(html);

    let title = first_text(&document, &["h1", "title"]).unwrap_or_default();
    let job_content = CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .map(visible_text)
                .find(|text| text.chars().count() >= MIN_BLOCK_LEN)
        })
        .unwrap_or_default();
    let full_text = visible_text(document.root_element());

    ScrapedPage {
        title,
        job_content,
        full_text,
    }
}

fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .map(visible_text)
                .find(|t| !t.is_empty())
        })
}

/// Text nodes under `root`, skipping script-like elements, with whitespace collapsed.
fn visible_text(root: ElementRef) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| HIDDEN_TAGS.contains(&el.value().name()));
        if !hidden {
            parts.push(text);
        }
    }
    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{response::Html as HtmlBody, routing::get, Router};

    const PAGE: &str = r#"<html><head><title>Backend Developer - Acme</title>
        <script>var tracking = "ignore me";</script></head>
        <body><nav>Ana Sayfa</nav>
        <h1>Backend Developer</h1>
        <div class="job-description">
          <p>Şirket: Acme Yazılım</p>
          <ul><li>En az 3 yıl Java deneyimi</li><li>Docker bilgisi tercih sebebidir</li></ul>
        </div></body></html>"#;

    #[test]
    fn test_extract_page_prefers_description_block() {
        let page = extract_page(PAGE);
        assert_eq!(page.title, "Backend Developer");
        assert!(page.job_content.starts_with("Şirket: Acme Yazılım"));
        assert!(page.job_content.contains("Docker bilgisi"));
        assert!(!page.job_content.contains("Ana Sayfa"));
        assert!(page.full_text.contains("Ana Sayfa"));
        assert!(!page.full_text.contains("tracking"));
        assert_eq!(page.content(), page.job_content);
    }

    #[test]
    fn test_content_falls_back_to_full_text() {
        let page = extract_page("<html><body><p>Kısa metin</p></body></html>");
        assert!(page.job_content.is_empty());
        assert_eq!(page.content(), "Kısa metin");
    }

    #[tokio::test]
    async fn test_http_scraper_fetches_and_rejects_errors() {
        let app = Router::new()
            .route("/ilan", get(|| async { HtmlBody(PAGE) }))
            .route(
                "/yok",
                get(|| async { (axum::http::StatusCode::NOT_FOUND, "yok") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let scraper = HttpJobScraper::new().unwrap();
        let page = scraper.fetch(&format!("http://{addr}/ilan")).await.unwrap();
        assert!(page.content().contains("3 yıl Java"));
        assert!(scraper.fetch(&format!("http://{addr}/yok")).await.is_err());
    }
}
