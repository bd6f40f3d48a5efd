//! Vector index trait for storing and searching embedded chunks.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::document::{IndexStats, SimilarityResult};
use crate::error::Result;

/// A similarity index over embedded document chunks.
///
/// Implementations own their store exclusively for its lifetime and vectorize
/// incoming text through an [`EmbeddingProvider`](crate::EmbeddingProvider).
/// Ingestion is all-or-nothing per document batch: a batch that fails to
/// embed leaves the store untouched.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_retrieval::{InMemoryVectorIndex, VectorIndex};
///
/// let index = InMemoryVectorIndex::new(provider);
/// index.add_chunks("report.pdf", &chunks, None).await?;
/// let results = index.query("revenue growth", 10, None).await?;
/// ```
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Embed and append one batch of chunk texts for a document.
    ///
    /// Assigns `chunk_index` by position in `texts` and generates an id
    /// unique within the store. `extra`, when given, must hold one metadata
    /// map per chunk and is attached positionally.
    ///
    /// Returns the ids of the inserted chunks, in input order.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures; on any error, no chunks are added.
    async fn add_chunks(
        &self,
        document_name: &str,
        texts: &[String],
        extra: Option<&[HashMap<String, String>]>,
    ) -> Result<Vec<String>>;

    /// Search for the `top_k` chunks most similar to `query_text`.
    ///
    /// When `document_filter` is `Some` and non-empty, only chunks whose
    /// document name is in the filter are candidates; filter names matching
    /// zero chunks simply contribute no candidates. An empty candidate set
    /// yields `Ok(vec![])`, not an error.
    ///
    /// Results are ordered by descending similarity, ties broken by
    /// insertion order.
    async fn query(
        &self,
        query_text: &str,
        top_k: usize,
        document_filter: Option<&[String]>,
    ) -> Result<Vec<SimilarityResult>>;

    /// Remove all chunks belonging to `document_name`.
    ///
    /// Returns the number of chunks removed; zero matches is not an error.
    async fn delete_document(&self, document_name: &str) -> Result<usize>;

    /// Return a read-only snapshot of index contents.
    async fn stats(&self) -> IndexStats;
}
