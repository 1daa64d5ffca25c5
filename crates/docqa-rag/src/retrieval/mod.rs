//! In-memory semantic retrieval: document store, ranking and context assembly

mod context;
mod search;
mod store;

pub use context::ContextAssembler;
pub use search::{cosine_similarity, RankedResult, SimilarityRanker};
pub use store::{DocumentStore, Snapshot};
