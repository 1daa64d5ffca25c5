//! Core types for the Q&A service

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, DocumentEntry, DocumentSource, EmbeddingVector};
pub use query::{ChatRequest, UrlRequest};
pub use response::{ChatResponse, DocumentListResponse, DocumentSummary, IngestResponse};
