//! Data types for indexed chunks and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A contiguous window of a document's text with its vector embedding.
///
/// Chunks are created in a batch when a document is ingested and deleted in a
/// batch when the document is removed. They are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk, stable per insertion.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// Name of the owning document.
    pub document_name: String,
    /// Position of this chunk within the document's chunk sequence.
    pub chunk_index: usize,
    /// Extensible key-value metadata attached at ingestion.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

/// A query-time projection of a [`Chunk`]; not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// The matched chunk's identifier.
    pub id: String,
    /// The matched chunk's text.
    pub text: String,
    /// Name of the owning document, used by callers to attach citations.
    pub document_name: String,
    /// Position of the matched chunk within its document.
    pub chunk_index: usize,
    /// Extensible metadata carried over from the chunk.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
    /// `1 − cosine similarity`, in `[0, 2]`; lower is more relevant.
    pub distance: f32,
}

/// A read-only snapshot of index contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Total number of chunks in the index.
    pub total_chunks: usize,
    /// Chunk count per document name.
    pub documents: HashMap<String, usize>,
}
