//! Cache error types.

use thiserror::Error;

/// Errors raised by a [`SessionCache`](super::SessionCache) backend.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to read or write a cache file.
    #[error("Cache I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped to a storage location.
    #[error("Invalid cache key '{key}'")]
    InvalidKey { key: String },
}
