//! Directory-backed session cache.

use super::{CacheError, SessionCache};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cache storing one `<key>.json` file per entry in a session directory.
///
/// Lets separate invocations in the same shell session share one fetch.
/// Entries never expire; removing the directory ends the session.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Uses `dir` as the session directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Returns the session directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(CacheError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionCache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = match self.entry_path(key) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Skipping cache lookup");
                return None;
            }
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cache entry");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        debug!(path = %path.display(), bytes = value.len(), "Writing cache entry");
        std::fs::write(&path, value).map_err(|source| CacheError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
