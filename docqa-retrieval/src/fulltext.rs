//! Full-text fallback sources.
//!
//! When vector search is unavailable or returns nothing, the pipeline falls
//! back to whole-document text obtained through a [`FullTextSource`].

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, RetrievalError};

/// A collaborator that can produce a document's full extracted text.
///
/// Absence of a document is `Ok(None)`, not an error.
#[async_trait]
pub trait FullTextSource: Send + Sync {
    /// Return the full extracted text for `document_name`, if known.
    async fn full_text(&self, document_name: &str) -> Result<Option<String>>;
}

/// A [`FullTextSource`] over a directory of extracted `.txt` files.
///
/// Looks for a `.txt` file whose name contains the document name with any
/// `.pdf` suffix stripped, the layout produced by the upload flow's text
/// extraction step. A missing directory or file yields `None`.
pub struct DirectoryTextSource {
    dir: PathBuf,
}

impl DirectoryTextSource {
    /// Create a source reading from the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FullTextSource for DirectoryTextSource {
    async fn full_text(&self, document_name: &str) -> Result<Option<String>> {
        let stem = document_name.strip_suffix(".pdf").unwrap_or(document_name);

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(_) => {
                debug!(dir = %self.dir.display(), "text directory not readable");
                return Ok(None);
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RetrievalError::IndexError(format!("reading text directory: {e}")))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.ends_with(".txt") && name.contains(stem) {
                let text = tokio::fs::read_to_string(entry.path()).await.map_err(|e| {
                    RetrievalError::IndexError(format!("reading text file '{name}': {e}"))
                })?;
                return Ok(Some(text));
            }
        }

        Ok(None)
    }
}

/// A [`FullTextSource`] over an in-memory map, for tests and small setups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTextSource {
    texts: HashMap<String, String>,
}

impl InMemoryTextSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's full text, replacing any existing entry.
    pub fn insert(&mut self, document_name: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(document_name.into(), text.into());
    }
}

#[async_trait]
impl FullTextSource for InMemoryTextSource {
    async fn full_text(&self, document_name: &str) -> Result<Option<String>> {
        Ok(self.texts.get(document_name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_source_finds_extracted_text() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("1700000000_report.txt"), "extracted text")
            .await
            .unwrap();

        let source = DirectoryTextSource::new(dir.path());
        let text = source.full_text("report.pdf").await.unwrap();
        assert_eq!(text.as_deref(), Some("extracted text"));
    }

    #[tokio::test]
    async fn directory_source_misses_are_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryTextSource::new(dir.path());
        assert!(source.full_text("absent.pdf").await.unwrap().is_none());

        let source = DirectoryTextSource::new("/nonexistent/uploads");
        assert!(source.full_text("absent.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_source_round_trips() {
        let mut source = InMemoryTextSource::new();
        source.insert("D1", "alpha beta");
        assert_eq!(source.full_text("D1").await.unwrap().as_deref(), Some("alpha beta"));
        assert!(source.full_text("D2").await.unwrap().is_none());
    }
}
