//! Retrieval pipeline orchestrator.
//!
//! The [`RetrievalPipeline`] coordinates ingestion (chunk → embed → index)
//! and context assembly for a query (vector search with graceful degradation
//! to full-document text). The assembled context string is what the caller
//! hands to its language-model client; that call is outside this crate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chunking::{Chunker, WordWindowChunker};
use crate::config::RetrievalConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::fulltext::FullTextSource;
use crate::index::VectorIndex;

/// How a context string was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetrievalMethod {
    /// Top-k similarity search over indexed chunks.
    Vector,
    /// Whole-document text from the fallback source.
    FullText,
}

/// The assembled context for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedContext {
    /// The context text to hand to the language model.
    pub text: String,
    /// Which retrieval path produced the text. Vector results and full-text
    /// sections are never mixed.
    pub method: RetrievalMethod,
}

/// The retrieval pipeline orchestrator.
///
/// Composes an [`EmbeddingProvider`], a [`VectorIndex`], a [`FullTextSource`],
/// and a [`Chunker`]. Construct one via [`RetrievalPipeline::builder()`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docqa_retrieval::{InMemoryVectorIndex, RetrievalConfig, RetrievalPipeline};
///
/// let provider = Arc::new(OpenAIEmbeddingProvider::from_env());
/// let pipeline = RetrievalPipeline::builder()
///     .config(RetrievalConfig::default())
///     .embedding_provider(provider.clone())
///     .vector_index(Arc::new(InMemoryVectorIndex::new(provider)))
///     .full_text_source(Arc::new(DirectoryTextSource::new("uploads")))
///     .build()?;
///
/// pipeline.ingest("report.pdf", &extracted_text).await?;
/// let ctx = pipeline.build_context("what changed in Q3?", &docs).await?;
/// ```
pub struct RetrievalPipeline {
    config: RetrievalConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_index: Arc<dyn VectorIndex>,
    full_text_source: Arc<dyn FullTextSource>,
    chunker: Arc<dyn Chunker>,
}

impl RetrievalPipeline {
    /// Create a new [`RetrievalPipelineBuilder`].
    pub fn builder() -> RetrievalPipelineBuilder {
        RetrievalPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Ingest a document: chunk its extracted text and index the chunks.
    ///
    /// Returns the ids of the indexed chunks. Text that chunks to nothing is
    /// a no-op returning an empty vec.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures from the index; in that case no chunks
    /// of this document were added, and previously indexed documents are
    /// untouched.
    pub async fn ingest(&self, document_name: &str, text: &str) -> Result<Vec<String>> {
        let chunks = self.chunker.chunk(text);
        if chunks.is_empty() {
            info!(document_name, chunk_count = 0, "ingested document (empty)");
            return Ok(Vec::new());
        }

        let ids = self.vector_index.add_chunks(document_name, &chunks, None).await?;
        info!(document_name, chunk_count = ids.len(), "ingested document");
        Ok(ids)
    }

    /// Assemble the context string for a query over the allowed documents.
    ///
    /// Tries vector search first when the embedding provider is configured;
    /// an embedding failure or an empty result set degrades to full-document
    /// text from the fallback source. The two paths are never mixed.
    ///
    /// # Errors
    ///
    /// - [`RetrievalError::NoContentAvailable`] if neither path produced any
    ///   content (including an empty `allowed_documents`).
    /// - [`RetrievalError::DimensionMismatch`] propagates unchanged: it
    ///   signals an index defect, not a degraded provider, so it is not
    ///   recovered by fallback.
    pub async fn build_context(
        &self,
        query: &str,
        allowed_documents: &[String],
    ) -> Result<RetrievedContext> {
        if allowed_documents.is_empty() {
            return Err(RetrievalError::NoContentAvailable);
        }

        if self.embedding_provider.is_available() {
            match self
                .vector_index
                .query(query, self.config.top_k, Some(allowed_documents))
                .await
            {
                Ok(results) if !results.is_empty() => {
                    info!(result_count = results.len(), "assembled vector search context");
                    let text = results
                        .iter()
                        .enumerate()
                        .map(|(idx, r)| {
                            format!(
                                "--- Relevant Chunk {} from {} ---\n{}",
                                idx + 1,
                                r.document_name,
                                r.text
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n\n");
                    return Ok(RetrievedContext { text, method: RetrievalMethod::Vector });
                }
                Ok(_) => {
                    debug!("vector search returned no results, using full-text fallback");
                }
                Err(err @ RetrievalError::DimensionMismatch { .. }) => return Err(err),
                Err(err) => {
                    warn!(error = %err, "vector search failed, using full-text fallback");
                }
            }
        } else {
            debug!("embedding provider not configured, using full-text fallback");
        }

        self.full_text_context(allowed_documents).await
    }

    /// Assemble context from whole-document text.
    async fn full_text_context(&self, allowed_documents: &[String]) -> Result<RetrievedContext> {
        let mut sections = Vec::new();
        for document_name in allowed_documents {
            match self.full_text_source.full_text(document_name).await? {
                Some(text) => {
                    sections.push(format!("--- Document: {document_name} ---\n{text}"));
                }
                None => {
                    debug!(document_name, "no full text found for document");
                }
            }
        }

        if sections.is_empty() {
            warn!("no document contents available for fallback");
            return Err(RetrievalError::NoContentAvailable);
        }

        info!(document_count = sections.len(), "assembled full-text context");
        Ok(RetrievedContext { text: sections.join("\n\n"), method: RetrievalMethod::FullText })
    }

    /// Remove a document's chunks from the index.
    ///
    /// Returns the number of chunks removed.
    pub async fn delete_document(&self, document_name: &str) -> Result<usize> {
        self.vector_index.delete_document(document_name).await
    }

    /// Return a snapshot of index contents.
    pub async fn stats(&self) -> crate::document::IndexStats {
        self.vector_index.stats().await
    }
}

/// Builder for constructing a [`RetrievalPipeline`].
///
/// The embedding provider, vector index, and full-text source are required.
/// The chunker defaults to a [`WordWindowChunker`] sized from the config.
#[derive(Default)]
pub struct RetrievalPipelineBuilder {
    config: Option<RetrievalConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_index: Option<Arc<dyn VectorIndex>>,
    full_text_source: Option<Arc<dyn FullTextSource>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RetrievalPipelineBuilder {
    /// Set the pipeline configuration. Defaults to [`RetrievalConfig::default()`].
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider used for the availability check.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector index.
    pub fn vector_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.vector_index = Some(index);
        self
    }

    /// Set the full-text fallback source.
    pub fn full_text_source(mut self, source: Arc<dyn FullTextSource>) -> Self {
        self.full_text_source = Some(source);
        self
    }

    /// Override the default word-window chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RetrievalPipeline`], validating that all required pieces
    /// are present and the config is consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::ConfigError`] if a required component is
    /// missing or the chunking parameters are invalid.
    pub fn build(self) -> Result<RetrievalPipeline> {
        let config = self.config.unwrap_or_default();
        let embedding_provider = self.embedding_provider.ok_or_else(|| {
            RetrievalError::ConfigError("embedding_provider is required".to_string())
        })?;
        let vector_index = self
            .vector_index
            .ok_or_else(|| RetrievalError::ConfigError("vector_index is required".to_string()))?;
        let full_text_source = self.full_text_source.ok_or_else(|| {
            RetrievalError::ConfigError("full_text_source is required".to_string())
        })?;
        let chunker = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(WordWindowChunker::new(config.window_size, config.overlap)?),
        };

        Ok(RetrievalPipeline {
            config,
            embedding_provider,
            vector_index,
            full_text_source,
            chunker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_method_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&RetrievalMethod::Vector).unwrap(), "\"vector\"");
        assert_eq!(serde_json::to_string(&RetrievalMethod::FullText).unwrap(), "\"full-text\"");
    }

    #[test]
    fn builder_requires_components() {
        let err = RetrievalPipeline::builder().build();
        assert!(matches!(err, Err(RetrievalError::ConfigError(_))));
    }
}
