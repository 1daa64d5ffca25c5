//! In-memory document store guarded by a reader/writer lock

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Chunk, DocumentEntry, EmbeddingVector};

/// Point-in-time view of the store, in document insertion order
pub type Snapshot = Vec<(String, Arc<DocumentEntry>)>;

/// Volatile mapping from document identifier to its chunks and embeddings.
///
/// Readers (`get`, `snapshot_all`) run concurrently; `put` takes the write
/// lock only to swap in an already fully built entry, so no reader can see
/// a document whose chunks and embeddings disagree.
#[derive(Default)]
pub struct DocumentStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    /// Identifiers in first-insertion order
    order: Vec<String>,
    entries: HashMap<String, Arc<DocumentEntry>>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and install a document, replacing any previous version
    pub fn put(
        &self,
        id: impl Into<String>,
        chunks: Vec<Chunk>,
        embeddings: Vec<EmbeddingVector>,
    ) -> Result<Option<Arc<DocumentEntry>>> {
        let entry = DocumentEntry::new(id, chunks, embeddings)?;
        Ok(self.insert(entry))
    }

    /// Install a prebuilt entry, returning the version it replaced.
    ///
    /// A replaced document keeps its original position in iteration order.
    pub fn insert(&self, entry: DocumentEntry) -> Option<Arc<DocumentEntry>> {
        let id = entry.id().to_string();
        let entry = Arc::new(entry);

        let mut inner = self.inner.write();
        let previous = inner.entries.insert(id.clone(), entry);
        if previous.is_none() {
            inner.order.push(id);
        }
        previous
    }

    /// Get the current version of a document
    pub fn get(&self, id: &str) -> Option<Arc<DocumentEntry>> {
        self.inner.read().entries.get(id).cloned()
    }

    /// Consistent view of every document, in insertion order
    pub fn snapshot_all(&self) -> Snapshot {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id).map(|e| (id.clone(), Arc::clone(e))))
            .collect()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of chunks across all documents
    pub fn total_chunks(&self) -> usize {
        self.inner.read().entries.values().map(|e| e.len()).sum()
    }
}
