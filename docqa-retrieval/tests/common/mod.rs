#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docqa_retrieval::{EmbeddingProvider, Result, RetrievalError};

/// Derive a deterministic, non-zero embedding from text content.
///
/// Not a meaningful semantic embedding, but identical texts always map to
/// identical vectors, which is what the tests rely on.
pub fn embed_text(text: &str, dims: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; dims];
    v[0] = 1.0;
    for (i, b) in text.bytes().enumerate() {
        v[(i + b as usize) % dims] += f32::from(b) / 128.0;
    }
    v
}

/// A scripted embedding provider for tests.
///
/// Embeds deterministically via [`embed_text`], can report itself
/// unconfigured, and can be told to fail a specific call by index.
pub struct MockEmbeddingProvider {
    dims: usize,
    available: bool,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new(dims: usize) -> Self {
        Self { dims, available: true, fail_on_call: None, calls: AtomicUsize::new(0) }
    }

    /// Report the provider as unconfigured (no credentials).
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Fail the nth individual embed call (0-based) with `EmbeddingFailed`.
    pub fn fail_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    /// Number of individual embed calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.available {
            return Err(RetrievalError::ServiceUnavailable { provider: "mock".into() });
        }
        if self.fail_on_call == Some(call) {
            return Err(RetrievalError::EmbeddingFailed {
                provider: "mock".into(),
                message: format!("scripted failure on call {call}"),
            });
        }
        Ok(embed_text(text, self.dims))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
