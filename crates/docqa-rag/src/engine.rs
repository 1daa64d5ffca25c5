//! Ingest and query operations over the document store
//!
//! Ingestion is chunk → embed → publish: the store is only touched once the
//! whole document has been embedded, so a failed or timed-out ingestion
//! leaves no trace. Queries embed the question, rank a single snapshot of
//! the store, assemble context from that same snapshot and hand the prompt
//! to the generator. Collaborator calls never run under the store lock.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{NoContextPolicy, RagConfig};
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::TextChunker;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::{ContextAssembler, DocumentStore, RankedResult, SimilarityRanker};
use crate::types::{DocumentEntry, DocumentSource, EmbeddingVector};

/// Answer returned under the decline policy when nothing relevant was retrieved
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find relevant information in the indexed documents to answer this question.";

/// Result of an ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Identifier the document is stored under
    pub document_id: String,
    /// Number of chunks indexed (0 for empty text, which is a no-op)
    pub chunks: usize,
    /// Whether an earlier version was replaced
    pub replaced: bool,
}

/// Result of a query
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Generated (or declined) answer
    pub answer: String,
    /// Ranked chunks used as context
    pub results: Vec<RankedResult>,
    /// Context string handed to the generator
    pub context: String,
    /// Whether the generator was called
    pub generated: bool,
}

/// Retrieval-augmented Q&A engine with injected store and capabilities
pub struct RagEngine {
    store: Arc<DocumentStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    chunker: TextChunker,
    ranker: SimilarityRanker,
    assembler: ContextAssembler,
    default_top_k: usize,
    max_top_k: usize,
    max_tokens: u32,
    no_context: NoContextPolicy,
    min_score: f32,
    deadline: Option<Duration>,
}

impl RagEngine {
    /// Create an engine from configuration
    pub fn new(
        config: &RagConfig,
        store: Arc<DocumentStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            store,
            embedder,
            llm,
            chunker: TextChunker::new(config.chunking.chunk_size)?,
            ranker: SimilarityRanker::new(),
            assembler: ContextAssembler::default(),
            default_top_k: config.retrieval.top_k,
            max_top_k: config.retrieval.max_top_k.max(config.retrieval.top_k),
            max_tokens: config.llm.max_tokens,
            no_context: config.retrieval.no_context,
            min_score: config.retrieval.min_score,
            deadline: config.llm.deadline(),
        })
    }

    /// Override the collaborator deadline
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Shared document store
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    /// Ingest raw text under `document_id`
    pub async fn ingest(&self, document_id: &str, text: &str) -> Result<IngestOutcome> {
        self.ingest_from(document_id, text, DocumentSource::Text).await
    }

    /// Ingest raw text, recording where it came from
    pub async fn ingest_from(
        &self,
        document_id: &str,
        text: &str,
        source: DocumentSource,
    ) -> Result<IngestOutcome> {
        if document_id.trim().is_empty() {
            return Err(Error::validation("document id is empty"));
        }

        let start = Instant::now();
        let chunks = self.chunker.split(document_id, text);

        if chunks.is_empty() {
            tracing::info!("Document '{}' has no text, nothing indexed", document_id);
            return Ok(IngestOutcome {
                document_id: document_id.to_string(),
                chunks: 0,
                replaced: false,
            });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self
            .bounded(self.embedder.embed(&texts), Error::Embedding)
            .await?;
        self.check_embeddings(&embeddings, texts.len())?;

        let chunk_count = chunks.len();
        let entry = DocumentEntry::new(document_id, chunks, embeddings)?.with_source(source);
        let replaced = self.store.insert(entry).is_some();

        tracing::info!(
            "Indexed '{}': {} chunks in {}ms{}",
            document_id,
            chunk_count,
            start.elapsed().as_millis(),
            if replaced { " (replaced previous version)" } else { "" }
        );

        Ok(IngestOutcome {
            document_id: document_id.to_string(),
            chunks: chunk_count,
            replaced,
        })
    }

    /// Rank stored chunks for a question and assemble their context
    pub async fn retrieve(
        &self,
        question: &str,
        top_k: Option<usize>,
    ) -> Result<(Vec<RankedResult>, String)> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::validation("No query provided"));
        }
        let top_k = self.resolve_top_k(top_k)?;

        let query_vector = self
            .bounded(self.embedder.embed_query(question), Error::Embedding)
            .await?;
        self.check_embeddings(std::slice::from_ref(&query_vector), 1)?;

        let snapshot = self.store.snapshot_all();
        let results = self.ranker.rank_snapshot(&query_vector, &snapshot, top_k);
        let context = self.assembler.assemble_snapshot(&results, &snapshot);

        Ok((results, context))
    }

    /// Answer a question from the indexed documents
    pub async fn query(&self, question: &str, top_k: Option<usize>) -> Result<QueryOutcome> {
        let start = Instant::now();
        let (results, context) = self.retrieve(question, top_k).await?;

        if self.should_decline(&results) {
            tracing::info!(
                "No relevant context for query ({} results), declining",
                results.len()
            );
            return Ok(QueryOutcome {
                answer: NO_CONTEXT_ANSWER.to_string(),
                results,
                context,
                generated: false,
            });
        }

        let prompt = PromptBuilder::build_qa_prompt(&context, question.trim());
        let answer = self
            .bounded(self.llm.generate(&prompt, self.max_tokens), Error::Generation)
            .await?;

        tracing::info!(
            "Query answered in {}ms using {} chunks",
            start.elapsed().as_millis(),
            results.len()
        );

        Ok(QueryOutcome {
            answer,
            results,
            context,
            generated: true,
        })
    }

    fn resolve_top_k(&self, requested: Option<usize>) -> Result<usize> {
        match requested {
            None => Ok(self.default_top_k),
            Some(0) => Err(Error::validation("top_k must be positive")),
            Some(k) if k > self.max_top_k => Err(Error::validation(format!(
                "top_k must not exceed {}",
                self.max_top_k
            ))),
            Some(k) => Ok(k),
        }
    }

    fn should_decline(&self, results: &[RankedResult]) -> bool {
        match self.no_context {
            NoContextPolicy::Forward => false,
            NoContextPolicy::Decline => results
                .first()
                .map_or(true, |best| best.score < self.min_score),
        }
    }

    /// Batch size and dimensionality checks on collaborator output
    fn check_embeddings(&self, embeddings: &[EmbeddingVector], expected: usize) -> Result<()> {
        if embeddings.len() != expected {
            return Err(Error::embedding(format!(
                "{} returned {} vectors for {} texts",
                self.embedder.name(),
                embeddings.len(),
                expected
            )));
        }

        let dimensions = self.embedder.dimensions();
        if dimensions > 0 {
            if let Some(bad) = embeddings.iter().find(|v| v.len() != dimensions) {
                return Err(Error::embedding(format!(
                    "expected {}-dimensional vectors, got {}",
                    dimensions,
                    bad.len()
                )));
            }
        }
        Ok(())
    }

    /// Apply the configured deadline to a collaborator call
    async fn bounded<T, F>(&self, call: F, on_timeout: fn(String) -> Error) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .map_err(|_| on_timeout(format!("timed out after {:?}", deadline)))?,
            None => call.await,
        }
    }
}
