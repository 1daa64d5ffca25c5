//! Response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{DocumentEntry, DocumentSource};

/// Response from a chat query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer
    pub answer: String,
    /// Number of chunks used as context
    pub chunks_used: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Response from an ingestion (file upload or URL)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Human-readable status
    pub message: String,
    /// Identifier the document is stored under
    pub document_id: String,
    /// Number of chunks indexed
    pub chunks: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Summary of an indexed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document identifier
    pub id: String,
    /// Origin of the text
    pub source: DocumentSource,
    /// Number of chunks
    pub chunks: usize,
    /// SHA-256 of the document text
    pub content_hash: String,
    /// When the current version was ingested
    pub ingested_at: DateTime<Utc>,
}

impl From<&DocumentEntry> for DocumentSummary {
    fn from(entry: &DocumentEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            source: entry.source().clone(),
            chunks: entry.len(),
            content_hash: entry.content_hash().to_string(),
            ingested_at: entry.ingested_at(),
        }
    }
}

/// Document listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    /// Documents in insertion order
    pub documents: Vec<DocumentSummary>,
    /// Number of documents
    pub total_count: usize,
    /// Number of chunks across all documents
    pub total_chunks: usize,
}
