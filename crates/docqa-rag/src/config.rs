//! Configuration for the Q&A service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Ollama/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Upload handling configuration
    #[serde(default)]
    pub upload: UploadConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: RagConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Override selected settings from `DOCQA_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("DOCQA_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DOCQA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("DOCQA_PORT: {}", e)))?;
        }
        if let Ok(url) = std::env::var("DOCQA_OLLAMA_URL") {
            self.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("DOCQA_EMBED_MODEL") {
            self.embeddings.model = model;
        }
        if let Ok(model) = std::env::var("DOCQA_GENERATE_MODEL") {
            self.llm.generate_model = model;
        }
        if let Ok(dir) = std::env::var("DOCQA_UPLOAD_DIR") {
            self.upload.upload_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunking.chunk_size must be positive".into()));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("retrieval.top_k must be positive".into()));
        }
        if self.llm.max_tokens == 0 {
            return Err(Error::Config("llm.max_tokens must be positive".into()));
        }
        if self.upload.allowed_extensions.is_empty() {
            return Err(Error::Config("upload.allowed_extensions is empty".into()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 32MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 32 * 1024 * 1024,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 512 }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding model served by Ollama
    pub model: String,
    /// Embedding dimensions (384 for all-minilm, 768 for nomic-embed-text)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "all-minilm".to_string(),
            dimensions: 384,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens in a generated answer
    pub max_tokens: u32,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
    /// Deadline for a single embed/generate call as seen by the engine
    pub deadline_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            generate_model: "llama3.2:3b".to_string(),
            temperature: 0.3,
            max_tokens: 150,
            timeout_secs: 120,
            max_retries: 2,
            deadline_secs: None,
        }
    }
}

impl LlmConfig {
    /// Engine-side deadline for collaborator calls
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

/// What the engine does when retrieval produced no usable context
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoContextPolicy {
    /// Send the (possibly empty) context to the generator as-is
    #[default]
    Forward,
    /// Skip generation and answer with a fixed "nothing found" message
    Decline,
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks used as context when the caller does not say
    pub top_k: usize,
    /// Upper bound accepted from callers
    pub max_top_k: usize,
    /// Behaviour when nothing relevant was retrieved
    pub no_context: NoContextPolicy,
    /// Best score below which the context counts as irrelevant (decline policy only)
    pub min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_top_k: 50,
            no_context: NoContextPolicy::Forward,
            min_score: 0.0,
        }
    }
}

/// Upload handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory uploaded files are saved to
    pub upload_dir: PathBuf,
    /// Accepted file extensions (lowercase, without dot)
    pub allowed_extensions: Vec<String>,
    /// Timeout for fetching web pages in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: vec!["txt".into(), "pdf".into(), "docx".into()],
            fetch_timeout_secs: 30,
        }
    }
}

impl UploadConfig {
    /// Check whether a filename carries an accepted extension
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}
