//! Session-scoped caching of the repository list.
//!
//! The cache is a plain string key/value store; [`load_records`] and
//! [`store_records`] handle the JSON encoding of the record list.

mod error;
mod file;
mod memory;

pub use error::CacheError;
pub use file::FileCache;
pub use memory::MemoryCache;

use crate::repository::RepositoryRecord;
use tracing::{debug, warn};

/// Key/value store scoped to one browsing session.
pub trait SessionCache {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), CacheError>;
}

/// Reads the cached record list.
///
/// An entry that fails to decode is treated as a miss.
pub fn load_records(cache: &dyn SessionCache, key: &str) -> Option<Vec<RepositoryRecord>> {
    let raw = cache.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(records) => Some(records),
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable cache entry");
            None
        }
    }
}

/// Writes the record list to the cache.
///
/// Failures are logged; the records are still usable in memory.
pub fn store_records(cache: &mut dyn SessionCache, key: &str, records: &[RepositoryRecord]) {
    let encoded = match serde_json::to_string(records) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!(key, error = %e, "Failed to encode records for cache");
            return;
        }
    };

    match cache.set(key, encoded) {
        Ok(()) => debug!(key, count = records.len(), "Cached repository list"),
        Err(e) => warn!(key, error = %e, "Failed to cache repository list"),
    }
}
