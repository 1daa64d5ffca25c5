//! Embedding provider trait for turning text into vectors

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::EmbeddingVector;

/// Trait for generating text embeddings
///
/// Implementations must return one vector per input text, in input order,
/// each of `dimensions()` length. Callers batch a whole document per call.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts
    async fn embed(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>>;

    /// Embed a single query text as a one-element batch
    async fn embed_query(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vectors = self.embed(&[text.to_string()]).await?;
        match vectors.pop() {
            Some(vector) if vectors.is_empty() => Ok(vector),
            _ => Err(Error::embedding(
                "provider did not return exactly one vector for the query",
            )),
        }
    }

    /// Embedding dimensions (e.g., 384 for all-minilm)
    fn dimensions(&self) -> usize;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
