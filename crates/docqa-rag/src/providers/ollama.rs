//! Ollama client for embeddings and answer generation with retry logic

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};
use crate::types::EmbeddingVector;

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Ollama API client with automatic retry
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Ollama base URL
    base_url: String,
    /// Embedding model name
    embed_model: String,
    /// Embedding dimensions
    dimensions: usize,
    /// Generation model name
    generate_model: String,
    /// Temperature for generation
    temperature: f32,
    /// Maximum retries
    max_retries: u32,
    /// Base delay between retries
    retry_base_delay: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaClient {
    /// Create a new Ollama client with retry support
    pub fn new(llm: &LlmConfig, embeddings: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(llm.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: llm.base_url.trim_end_matches('/').to_string(),
            embed_model: embeddings.model.clone(),
            dimensions: embeddings.dimensions,
            generate_model: llm.generate_model.clone(),
            temperature: llm.temperature,
            max_retries: llm.max_retries,
            retry_base_delay: Duration::from_secs(1),
        })
    }

    /// Override the base retry delay (doubles on every attempt)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < self.max_retries => {
                    let delay = self.retry_base_delay * 2u32.pow(attempt);
                    tracing::warn!(
                        "Ollama request failed (attempt {}/{}): {}; retrying in {:?}",
                        attempt + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request_embeddings(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        let url = format!("{}/api/embed", self.base_url);
        let request = EmbedRequest {
            model: &self.embed_model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!(
                "Embedding failed: HTTP {}",
                response.status()
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        Ok(embed_response.embeddings)
    }

    async fn request_generation(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.generate_model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("Failed to parse generation response: {}", e)))?;

        Ok(generate_response.response)
    }

    /// Check if Ollama is reachable
    async fn ping(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!("Embedding {} texts with {}", texts.len(), self.embed_model);
        self.retry_request(|| self.request_embeddings(texts)).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        self.ping().await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[async_trait]
impl LlmProvider for OllamaClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        tracing::info!("Generating answer with model: {}", self.generate_model);
        self.retry_request(|| self.request_generation(prompt, max_tokens))
            .await
    }

    async fn health_check(&self) -> Result<bool> {
        self.ping().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.generate_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_fake_ollama(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String, max_retries: u32) -> OllamaClient {
        let llm = LlmConfig {
            base_url,
            max_retries,
            timeout_secs: 5,
            ..LlmConfig::default()
        };
        let embeddings = EmbeddingConfig {
            model: "test-embed".into(),
            dimensions: 2,
        };
        OllamaClient::new(&llm, &embeddings)
            .unwrap()
            .with_retry_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_embed_sends_whole_batch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let router = Router::new().route(
            "/api/embed",
            post(move |Json(body): Json<Value>| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(body["model"], "test-embed");
                    let inputs = body["input"].as_array().unwrap();
                    let embeddings: Vec<Value> = inputs
                        .iter()
                        .map(|t| json!([t.as_str().unwrap().len() as f32, 1.0]))
                        .collect();
                    Json(json!({ "embeddings": embeddings }))
                }
            }),
        );
        let client = client_for(spawn_fake_ollama(router).await, 0);

        let texts = vec!["a".to_string(), "bbb".to_string()];
        let vectors = client.embed(&texts).await.unwrap();

        assert_eq!(vectors, vec![vec![1.0, 1.0], vec![3.0, 1.0]]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generate_passes_max_tokens() {
        let router = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["stream"], false);
                let limit = body["options"]["num_predict"].as_u64().unwrap();
                Json(json!({ "response": format!("limit={}", limit) }))
            }),
        );
        let client = client_for(spawn_fake_ollama(router).await, 0);

        let answer = client.generate("Context: \n\nQuestion: q\n\nAnswer:", 150).await.unwrap();
        assert_eq!(answer, "limit=150");
    }

    #[tokio::test]
    async fn test_generate_retries_then_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let router = Router::new().route(
            "/api/generate",
            post(move || {
                let seen = Arc::clone(&seen);
                async move {
                    seen.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, "model crashed")
                }
            }),
        );
        let client = client_for(spawn_fake_ollama(router).await, 2);

        let err = client.generate("prompt", 10).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("model crashed"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unhealthy() {
        let client = client_for("http://127.0.0.1:9".into(), 0);
        assert!(!EmbeddingProvider::health_check(&client).await.unwrap());
    }
}
