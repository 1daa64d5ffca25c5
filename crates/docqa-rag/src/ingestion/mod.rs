//! Document ingestion: text extraction and chunking

mod chunker;
mod parser;
mod web;

pub use chunker::TextChunker;
pub use parser::{FileKind, FileParser};
pub use web::{extract_paragraphs, WebExtractor};
