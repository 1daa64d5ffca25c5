//! Document, chunk and embedding types held by the document store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Fixed-dimension embedding of a text unit
pub type EmbeddingVector = Vec<f32>;

/// A positional slice of a document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Owning document
    pub document_id: String,
    /// Zero-based position within the document
    pub position: usize,
    /// Chunk text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(document_id: impl Into<String>, position: usize, text: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            position,
            text: text.into(),
        }
    }
}

/// Where a document's text came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum DocumentSource {
    /// Uploaded file (stored path)
    File(String),
    /// Web page URL
    Url(String),
    /// Text handed to the engine directly
    Text,
}

/// A fully populated document: chunks with their parallel embeddings
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    id: String,
    chunks: Vec<Chunk>,
    embeddings: Vec<EmbeddingVector>,
    source: DocumentSource,
    content_hash: String,
    ingested_at: DateTime<Utc>,
}

impl DocumentEntry {
    /// Build an entry, enforcing that every chunk has exactly one embedding
    pub fn new(
        id: impl Into<String>,
        chunks: Vec<Chunk>,
        embeddings: Vec<EmbeddingVector>,
    ) -> Result<Self> {
        let id = id.into();

        if chunks.len() != embeddings.len() {
            return Err(Error::embedding(format!(
                "document '{}' has {} chunks but {} embeddings",
                id,
                chunks.len(),
                embeddings.len()
            )));
        }

        for (expected, chunk) in chunks.iter().enumerate() {
            if chunk.position != expected || chunk.document_id != id {
                return Err(Error::internal(format!(
                    "chunk ({}, {}) does not belong at position {} of '{}'",
                    chunk.document_id, chunk.position, expected, id
                )));
            }
        }

        let content_hash = hash_content(chunks.iter().map(|c| c.text.as_str()));

        Ok(Self {
            id,
            chunks,
            embeddings,
            source: DocumentSource::Text,
            content_hash,
            ingested_at: Utc::now(),
        })
    }

    /// Record where the text came from
    pub fn with_source(mut self, source: DocumentSource) -> Self {
        self.source = source;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn embeddings(&self) -> &[EmbeddingVector] {
        &self.embeddings
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// SHA-256 of the full document text
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn ingested_at(&self) -> DateTime<Utc> {
        self.ingested_at
    }

    /// Chunk text at `position`, if present
    pub fn chunk_text(&self, position: usize) -> Option<&str> {
        self.chunks.get(position).map(|c| c.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Hash text pieces as if they were concatenated
fn hash_content<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
