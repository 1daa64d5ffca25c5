//! Fixed-size positional text chunking

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Splits text into consecutive, non-overlapping windows of `chunk_size` characters.
///
/// Chunking is purely positional: word and sentence boundaries are ignored.
/// Concatenating the chunk texts in order reproduces the input exactly.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    /// Window size in characters
    chunk_size: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".into()));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Split `text` into chunks owned by `document_id`.
    ///
    /// Produces `ceil(chars / chunk_size)` chunks, none for empty text.
    pub fn split(&self, document_id: &str, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(text.len() / self.chunk_size + 1);
        let mut start = 0usize;
        let mut chars_in_window = 0usize;

        for (byte_idx, _) in text.char_indices() {
            if chars_in_window == self.chunk_size {
                chunks.push(Chunk::new(document_id, chunks.len(), &text[start..byte_idx]));
                start = byte_idx;
                chars_in_window = 0;
            }
            chars_in_window += 1;
        }

        if start < text.len() {
            chunks.push(Chunk::new(document_id, chunks.len(), &text[start..]));
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self { chunk_size: 512 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_split_fixed_windows() {
        let chunker = TextChunker::new(4).unwrap();
        let chunks = chunker.split("d1", "abcdefghij");

        assert_eq!(texts(&chunks), vec!["abcd", "efgh", "ij"]);
        assert_eq!(
            chunks.iter().map(|c| c.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(chunks.iter().all(|c| c.document_id == "d1"));
    }

    #[test]
    fn test_split_exact_multiple() {
        let chunker = TextChunker::new(3).unwrap();
        assert_eq!(texts(&chunker.split("d", "abcdef")), vec!["abc", "def"]);
    }

    #[test]
    fn test_split_empty_text() {
        let chunker = TextChunker::new(8).unwrap();
        assert!(chunker.split("d", "").is_empty());
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let chunker = TextChunker::new(2).unwrap();
        let chunks = chunker.split("d", "héllo wörld");
        assert_eq!(texts(&chunks), vec!["hé", "ll", "o ", "wö", "rl", "d"]);
    }

    #[test]
    fn test_split_is_lossless() {
        let text = "The quick brown fox jumps over the lazy dog. Ünïcödé ✓ survives.";
        for size in 1..=text.chars().count() + 1 {
            let chunker = TextChunker::new(size).unwrap();
            let chunks = chunker.split("d", text);

            let expected = text.chars().count().div_ceil(size);
            assert_eq!(chunks.len(), expected, "size {}", size);
            assert_eq!(texts(&chunks).concat(), text, "size {}", size);
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(TextChunker::new(0).is_err());
    }
}
