//! Turns ranked results back into prompt context

use super::search::RankedResult;
use super::store::{DocumentStore, Snapshot};

/// Joins ranked chunk texts, in ranked order, into one context string
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    separator: String,
}

impl ContextAssembler {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Resolve results against the current store contents.
    ///
    /// Results whose chunk no longer exists are skipped.
    pub fn assemble(&self, results: &[RankedResult], store: &DocumentStore) -> String {
        let texts: Vec<String> = results
            .iter()
            .filter_map(|r| {
                store
                    .get(&r.document_id)
                    .and_then(|entry| entry.chunk_text(r.position).map(str::to_string))
            })
            .collect();
        texts.join(&self.separator)
    }

    /// Resolve results against the snapshot they were ranked from
    pub fn assemble_snapshot(&self, results: &[RankedResult], snapshot: &Snapshot) -> String {
        let texts: Vec<&str> = results
            .iter()
            .filter_map(|r| {
                snapshot
                    .iter()
                    .find(|(id, _)| *id == r.document_id)
                    .and_then(|(_, entry)| entry.chunk_text(r.position))
            })
            .collect();
        texts.join(&self.separator)
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn store_with(id: &str, texts: &[&str]) -> DocumentStore {
        let store = DocumentStore::new();
        let chunks = texts.iter().enumerate().map(|(i, t)| Chunk::new(id, i, *t)).collect();
        let embeddings = texts.iter().map(|_| vec![1.0]).collect();
        store.put(id, chunks, embeddings).unwrap();
        store
    }

    fn result(id: &str, position: usize) -> RankedResult {
        RankedResult {
            document_id: id.to_string(),
            position,
            score: 0.5,
        }
    }

    #[test]
    fn test_assemble_in_ranked_order() {
        let store = store_with("d1", &["alpha", "beta", "gamma"]);
        let results = vec![result("d1", 2), result("d1", 0)];

        let assembler = ContextAssembler::default();
        assert_eq!(assembler.assemble(&results, &store), "gamma alpha");
        assert_eq!(
            assembler.assemble_snapshot(&results, &store.snapshot_all()),
            "gamma alpha"
        );
    }

    #[test]
    fn test_assemble_empty() {
        let store = DocumentStore::new();
        assert_eq!(ContextAssembler::default().assemble(&[], &store), "");
    }

    #[test]
    fn test_assemble_skips_unresolvable() {
        let store = store_with("d1", &["only"]);
        let results = vec![result("d1", 5), result("gone", 0), result("d1", 0)];
        assert_eq!(ContextAssembler::new("\n").assemble(&results, &store), "only");
    }
}
