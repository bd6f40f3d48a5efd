//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`WordWindowChunker`], which
//! splits text into overlapping fixed-size word windows. Chunking is pure and
//! deterministic; embeddings are attached later by the index.

use crate::error::{Result, RetrievalError};

/// A strategy for splitting document text into chunk strings.
///
/// Returns an empty `Vec` for empty or whitespace-only input.
pub trait Chunker: Send + Sync {
    /// Split raw document text into an ordered sequence of chunk strings.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Splits text into overlapping windows of whitespace-separated words.
///
/// Successive windows of `window_size` words advance by `window_size − overlap`
/// words each step; the first window to reach the final word ends the
/// sequence, so no trailing window of already-covered words is emitted. Each
/// window's words are rejoined with single spaces, so runs of whitespace in
/// the input are collapsed.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_retrieval::WordWindowChunker;
///
/// let chunker = WordWindowChunker::new(3, 1)?;
/// let chunks = chunker.chunk("alpha beta gamma delta epsilon");
/// assert_eq!(chunks, ["alpha beta gamma", "gamma delta epsilon"]);
/// ```
#[derive(Debug, Clone)]
pub struct WordWindowChunker {
    window_size: usize,
    overlap: usize,
}

impl WordWindowChunker {
    /// Create a new `WordWindowChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::ConfigError`] if `window_size` is zero or
    /// `overlap >= window_size`.
    pub fn new(window_size: usize, overlap: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(RetrievalError::ConfigError(
                "window_size must be greater than zero".to_string(),
            ));
        }
        if overlap >= window_size {
            return Err(RetrievalError::ConfigError(format!(
                "overlap ({overlap}) must be less than window_size ({window_size})"
            )));
        }
        Ok(Self { window_size, overlap })
    }
}

impl Chunker for WordWindowChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let step = self.window_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.window_size).min(words.len());
            let chunk = words[start..end].join(" ");
            if !chunk.trim().is_empty() {
                chunks.push(chunk);
            }
            // A window that reaches the last word ends the sequence; stepping
            // further would only re-emit words the overlap already covered.
            if end == words.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}
