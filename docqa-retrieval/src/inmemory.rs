//! In-memory vector index using linear-scan cosine similarity.
//!
//! This module provides [`InMemoryVectorIndex`], a vector index backed by an
//! insertion-ordered `Vec` behind a `tokio::sync::RwLock`. It is sized for
//! small collections (tens of documents, thousands of chunks) and holds no
//! state across process restarts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::document::{Chunk, IndexStats, SimilarityResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::index::VectorIndex;

/// An in-memory [`VectorIndex`] using cosine similarity for search.
///
/// Chunks are kept in insertion order, which doubles as the deterministic
/// tie-break for equal similarity scores. Embedding calls never run while the
/// store lock is held: a batch is embedded fully, then appended atomically,
/// so a slow or failed provider cannot leave a document half-indexed or
/// block concurrent readers.
#[derive(Clone)]
pub struct InMemoryVectorIndex {
    provider: Arc<dyn EmbeddingProvider>,
    store: Arc<RwLock<Vec<Chunk>>>,
}

impl InMemoryVectorIndex {
    /// Create a new empty index that embeds through the given provider.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider, store: Arc::new(RwLock::new(Vec::new())) }
    }
}

/// Compute cosine similarity between two vectors: `dot(a,b) / (‖a‖·‖b‖)`.
///
/// Returns 0.0 if either vector has zero magnitude.
///
/// # Errors
///
/// Returns [`RetrievalError::DimensionMismatch`] if the lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RetrievalError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn add_chunks(
        &self,
        document_name: &str,
        texts: &[String],
        extra: Option<&[HashMap<String, String>]>,
    ) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(extra) = extra {
            if extra.len() != texts.len() {
                return Err(RetrievalError::IndexError(format!(
                    "got {} metadata maps for {} chunks",
                    extra.len(),
                    texts.len()
                )));
            }
        }

        // Embed the whole batch before touching the store, so a provider
        // failure leaves the document entirely unindexed.
        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = self.provider.embed_batch(&text_refs).await?;
        if embeddings.len() != texts.len() {
            return Err(RetrievalError::IndexError(format!(
                "provider returned {} embeddings for {} chunks",
                embeddings.len(),
                texts.len()
            )));
        }

        let chunks: Vec<Chunk> = texts
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(chunk_index, (text, embedding))| Chunk {
                id: format!("{document_name}_{chunk_index}_{}", Uuid::new_v4().simple()),
                text: text.clone(),
                embedding,
                document_name: document_name.to_string(),
                chunk_index,
                extra: extra.map(|e| e[chunk_index].clone()).unwrap_or_default(),
            })
            .collect();
        let ids: Vec<String> = chunks.iter().map(|c| c.id.clone()).collect();

        let mut store = self.store.write().await;
        store.extend(chunks);
        info!(document_name, chunk_count = ids.len(), total = store.len(), "indexed chunks");

        Ok(ids)
    }

    async fn query(
        &self,
        query_text: &str,
        top_k: usize,
        document_filter: Option<&[String]>,
    ) -> Result<Vec<SimilarityResult>> {
        let query_embedding = self.provider.embed(query_text).await?;

        let store = self.store.read().await;

        let candidates: Vec<&Chunk> = match document_filter {
            Some(filter) if !filter.is_empty() => store
                .iter()
                .filter(|c| filter.iter().any(|name| *name == c.document_name))
                .collect(),
            _ => store.iter().collect(),
        };
        debug!(
            total = store.len(),
            candidates = candidates.len(),
            filtered = document_filter.is_some(),
            "similarity scan"
        );
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, &Chunk)> = candidates
            .into_iter()
            .map(|chunk| Ok((cosine_similarity(&query_embedding, &chunk.embedding)?, chunk)))
            .collect::<Result<_>>()?;

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(similarity, chunk)| SimilarityResult {
                id: chunk.id.clone(),
                text: chunk.text.clone(),
                document_name: chunk.document_name.clone(),
                chunk_index: chunk.chunk_index,
                extra: chunk.extra.clone(),
                distance: 1.0 - similarity,
            })
            .collect())
    }

    async fn delete_document(&self, document_name: &str) -> Result<usize> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|c| c.document_name != document_name);
        let removed = before - store.len();
        info!(document_name, removed, "deleted document chunks");
        Ok(removed)
    }

    async fn stats(&self) -> IndexStats {
        let store = self.store.read().await;
        let mut documents: HashMap<String, usize> = HashMap::new();
        for chunk in store.iter() {
            *documents.entry(chunk.document_name.clone()).or_default() += 1;
        }
        IndexStats { total_chunks: store.len(), documents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.5f32, -0.25, 1.0];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_opposite_vectors_is_minus_one() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [-1.0f32, -2.0, -3.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_is_bounded() {
        let a = [0.3f32, -0.9, 0.1, 2.0];
        let b = [1.5f32, 0.2, -0.7, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((-1.0..=1.0).contains(&sim));
        let distance = 1.0 - sim;
        assert!((0.0..=2.0).contains(&distance));
    }

    #[test]
    fn zero_vector_scores_zero() {
        let a = [0.0f32, 0.0];
        let b = [1.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        let a = [1.0f32, 2.0];
        let b = [1.0f32, 2.0, 3.0];
        let err = cosine_similarity(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::DimensionMismatch { expected: 2, actual: 3 }
        ));
    }
}
