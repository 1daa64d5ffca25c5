//! docqa-rag: document question answering over an in-memory semantic index
//!
//! Documents (uploaded files, web pages or raw text) are split into
//! fixed-size chunks, embedded in one batch and kept in a process-wide
//! store. Questions are embedded, matched against every stored chunk by
//! cosine similarity, and the best chunks are handed to a generative model
//! as context.

pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use engine::{IngestOutcome, QueryOutcome, RagEngine};
pub use error::{Error, Result};
pub use providers::{EmbeddingProvider, LlmProvider, OllamaClient};
pub use retrieval::{DocumentStore, RankedResult};
pub use types::{Chunk, DocumentEntry, DocumentSource, EmbeddingVector};
