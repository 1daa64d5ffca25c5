//! Application state for the Q&A server

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RagConfig;
use crate::engine::RagEngine;
use crate::error::Result;
use crate::ingestion::WebExtractor;
use crate::providers::OllamaClient;
use crate::retrieval::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Ingest/query engine owning the document store
    engine: Arc<RagEngine>,
    /// Fetcher for `/process_url`
    web: WebExtractor,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create state backed by an Ollama server for embeddings and generation
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let ollama = Arc::new(OllamaClient::new(&config.llm, &config.embeddings)?);
        tracing::info!(
            "Ollama client initialized ({} for embeddings, {} for answers)",
            config.embeddings.model,
            config.llm.generate_model
        );

        let store = Arc::new(DocumentStore::new());
        let engine = RagEngine::new(&config, store, ollama.clone(), ollama)?;

        Self::with_engine(config, Arc::new(engine))
    }

    /// Create state around an existing engine
    pub fn with_engine(config: RagConfig, engine: Arc<RagEngine>) -> Result<Self> {
        let web = WebExtractor::new(Duration::from_secs(config.upload.fetch_timeout_secs))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                engine,
                web,
                ready: RwLock::new(true),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the engine
    pub fn engine(&self) -> &Arc<RagEngine> {
        &self.inner.engine
    }

    /// Get the web page extractor
    pub fn web(&self) -> &WebExtractor {
        &self.inner.web
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
