//! Exhaustive cosine-similarity ranking over the document store

use std::cmp::Ordering;

use super::store::{DocumentStore, Snapshot};

/// A ranked chunk reference, produced per query and never stored
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    /// Document the chunk belongs to
    pub document_id: String,
    /// Chunk position within the document
    pub position: usize,
    /// Cosine similarity to the query (-1.0 to 1.0)
    pub score: f32,
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero magnitude or the dimensions differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    // f64 accumulation keeps squares of extreme f32 components finite and non-zero
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (dot / denom).clamp(-1.0, 1.0) as f32
}

/// Candidate during merging; `doc_order` is the document's snapshot index
struct Candidate {
    doc_order: usize,
    position: usize,
    score: f32,
}

/// Descending score, then snapshot order, then ascending chunk position
fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.doc_order.cmp(&b.doc_order))
        .then(a.position.cmp(&b.position))
}

/// Ranks every stored chunk against a query vector.
///
/// Each document contributes at most `top_k` local candidates; the merged pool
/// is sorted and cut to `top_k`. A chunk outside its own document's top `top_k`
/// can never reach the global top `top_k`, so the result equals a full sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker;

impl SimilarityRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank against the current contents of `store`
    pub fn rank(&self, query: &[f32], store: &DocumentStore, top_k: usize) -> Vec<RankedResult> {
        self.rank_snapshot(query, &store.snapshot_all(), top_k)
    }

    /// Rank against an already taken snapshot
    pub fn rank_snapshot(
        &self,
        query: &[f32],
        snapshot: &Snapshot,
        top_k: usize,
    ) -> Vec<RankedResult> {
        if top_k == 0 || snapshot.is_empty() {
            return Vec::new();
        }

        let mut pool: Vec<Candidate> = Vec::new();

        for (doc_order, (_, entry)) in snapshot.iter().enumerate() {
            let mut local: Vec<Candidate> = entry
                .embeddings()
                .iter()
                .enumerate()
                .map(|(position, embedding)| Candidate {
                    doc_order,
                    position,
                    score: cosine_similarity(query, embedding),
                })
                .collect();

            if local.len() > top_k {
                local.select_nth_unstable_by(top_k - 1, rank_order);
                local.truncate(top_k);
            }
            pool.extend(local);
        }

        pool.sort_by(rank_order);
        pool.truncate(top_k);

        tracing::debug!(
            "Ranked {} documents, kept {} of top {}",
            snapshot.len(),
            pool.len(),
            top_k
        );

        pool.into_iter()
            .map(|c| RankedResult {
                document_id: snapshot[c.doc_order].0.clone(),
                position: c.position,
                score: c.score,
            })
            .collect()
    }
}
