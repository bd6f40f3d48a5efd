//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// implementation calls [`embed`](EmbeddingProvider::embed) per input;
/// backends that support native batching should override it.
///
/// A failed embedding call must surface as
/// [`RetrievalError::EmbeddingFailed`](crate::RetrievalError::EmbeddingFailed)
/// rather than returning an empty vector; callers rely on errors propagating
/// so partial results are never indexed.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_retrieval::EmbeddingProvider;
///
/// let provider = OpenAIEmbeddingProvider::from_env();
/// if provider.is_available() {
///     let embedding = provider.embed("hello world").await?;
///     assert_eq!(embedding.len(), provider.dimensions());
/// }
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The returned sequence has one embedding per input, in input order.
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// for each input and stops at the first failure. Override this method if
    /// the backend supports native batch embedding for better throughput.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Report whether the embedding capability is configured.
    ///
    /// Side-effect-free: checks credentials, never the network. When this
    /// returns `false`, the pipeline skips vector search entirely.
    fn is_available(&self) -> bool;
}
