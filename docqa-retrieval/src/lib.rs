//! Retrieval core for the document question-answering app.
//!
//! This crate provides:
//! - Word-window chunking of extracted document text
//! - An embedding provider abstraction (with an optional OpenAI backend
//!   behind the `openai` feature)
//! - An in-memory, linear-scan cosine-similarity index
//! - A pipeline that assembles the context string for a query, degrading
//!   gracefully to whole-document text when embeddings are unavailable
//!
//! The HTTP layer, PDF text extraction, and the language-model call itself
//! live outside this crate; the pipeline ends at a context string plus the
//! retrieval method used to produce it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_retrieval::{
//!     DirectoryTextSource, InMemoryVectorIndex, RetrievalConfig, RetrievalPipeline,
//! };
//! use docqa_retrieval::openai::OpenAIEmbeddingProvider;
//!
//! let provider = Arc::new(OpenAIEmbeddingProvider::from_env());
//! let pipeline = RetrievalPipeline::builder()
//!     .config(RetrievalConfig::default())
//!     .embedding_provider(provider.clone())
//!     .vector_index(Arc::new(InMemoryVectorIndex::new(provider)))
//!     .full_text_source(Arc::new(DirectoryTextSource::new("uploads")))
//!     .build()?;
//!
//! pipeline.ingest("report.pdf", &extracted_text).await?;
//! let ctx = pipeline.build_context("what changed in Q3?", &selected_docs).await?;
//! println!("{:?}: {}", ctx.method, ctx.text);
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod fulltext;
pub mod index;
pub mod inmemory;
pub mod pipeline;

#[cfg(feature = "openai")]
pub mod openai;

pub use chunking::{Chunker, WordWindowChunker};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use document::{Chunk, IndexStats, SimilarityResult};
pub use embedding::EmbeddingProvider;
pub use error::{Result, RetrievalError};
pub use fulltext::{DirectoryTextSource, FullTextSource, InMemoryTextSource};
pub use index::VectorIndex;
pub use inmemory::InMemoryVectorIndex;
pub use pipeline::{
    RetrievalMethod, RetrievalPipeline, RetrievalPipelineBuilder, RetrievedContext,
};
