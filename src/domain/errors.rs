//! Domain errors for the pricecache system.

use thiserror::Error;

/// Errors that can occur while retrieving prices through the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The upstream price service failed for a specific item code.
    ///
    /// The store is never mutated on this path, so a later call for the same
    /// item code will consult the upstream service again.
    #[error("getting price from service for {item_code}: {source}")]
    Upstream {
        /// Item code whose lookup failed.
        item_code: String,
        /// Underlying failure reported by the price service.
        #[source]
        source: anyhow::Error,
    },

    /// A batch retrieval was aborted because at least one constituent
    /// single-item retrieval failed. Wraps the first failure observed,
    /// exposed through the error chain rather than interpolated here.
    #[error("batch price retrieval aborted")]
    Batch(#[source] Box<CacheError>),
}

impl CacheError {
    /// Item code associated with this error, walking through batch wrappers.
    pub fn item_code(&self) -> &str {
        match self {
            Self::Upstream { item_code, .. } => item_code,
            Self::Batch(inner) => inner.item_code(),
        }
    }
}

/// Result alias used throughout the cache.
pub type CacheResult<T> = Result<T, CacheError>;
