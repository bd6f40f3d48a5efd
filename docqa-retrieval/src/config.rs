//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Configuration parameters for the retrieval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalConfig {
    /// Number of words per chunk window.
    pub window_size: usize,
    /// Number of overlapping words between consecutive chunks.
    pub overlap: usize,
    /// Number of top results to request from vector search.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { window_size: 500, overlap: 50, top_k: 10 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the number of words per chunk window.
    pub fn window_size(mut self, size: usize) -> Self {
        self.config.window_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in words.
    pub fn overlap(mut self, overlap: usize) -> Self {
        self.config.overlap = overlap;
        self
    }

    /// Set the number of top results to request from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::ConfigError`] if:
    /// - `window_size == 0`
    /// - `overlap >= window_size`
    /// - `top_k == 0`
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.window_size == 0 {
            return Err(RetrievalError::ConfigError(
                "window_size must be greater than zero".to_string(),
            ));
        }
        if self.config.overlap >= self.config.window_size {
            return Err(RetrievalError::ConfigError(format!(
                "overlap ({}) must be less than window_size ({})",
                self.config.overlap, self.config.window_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RetrievalError::ConfigError("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = RetrievalConfig::builder().build().unwrap();
        assert_eq!(config, RetrievalConfig::default());
    }

    #[test]
    fn overlap_must_be_less_than_window() {
        let err = RetrievalConfig::builder().window_size(50).overlap(50).build();
        assert!(matches!(err, Err(RetrievalError::ConfigError(_))));
    }

    #[test]
    fn zero_top_k_rejected() {
        let err = RetrievalConfig::builder().top_k(0).build();
        assert!(matches!(err, Err(RetrievalError::ConfigError(_))));
    }

    #[test]
    fn zero_window_rejected() {
        let err = RetrievalConfig::builder().window_size(0).overlap(0).build();
        assert!(matches!(err, Err(RetrievalError::ConfigError(_))));
    }
}
