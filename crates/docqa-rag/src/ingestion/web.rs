//! Web page fetching and paragraph text extraction

use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::error::{Error, Result};

/// Fetches a page and keeps the text of its `<p>` elements
pub struct WebExtractor {
    client: Client,
}

impl WebExtractor {
    /// Create an extractor with a request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("docqa-rag/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Fetch `url` and extract its visible paragraph text
    pub async fn extract(&self, url: &str) -> Result<String> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| Error::validation(format!("Invalid URL '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        tracing::info!("Fetching {}", url);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| Error::extraction(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::extraction(url, format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::extraction(url, e.to_string()))?;

        extract_paragraphs(&body).map_err(|message| Error::extraction(url, message))
    }
}

/// Join the text of every `<p>` element with single spaces
pub fn extract_paragraphs(html: &str) -> std::result::Result<String, String> {
    let selector = Selector::parse("p").map_err(|e| e.to_string())?;
    let document = Html::parse_document(html);

    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect();

    Ok(paragraphs.join(" "))
}
