//! Provider abstractions for embeddings and answer generation
//!
//! The engine only talks to these traits, so tests can swap in
//! deterministic fakes for the Ollama-backed implementation.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::OllamaClient;
