//! Session configuration.

use std::path::{Path, PathBuf};

/// Inputs for building a [`Session`](super::Session), usually from CLI flags.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path to `showcase.toml`.
    config_path: PathBuf,
    /// GitHub token; requests are anonymous without one.
    token: Option<String>,
    /// Directory for a file-backed session cache.
    cache_dir: Option<PathBuf>,
    /// Overrides the configured username.
    username: Option<String>,
    /// Overrides the configured default language.
    language: Option<String>,
}

impl SessionConfig {
    /// Creates a configuration reading settings from `config_path`.
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            token: None,
            cache_dir: None,
            username: None,
            language: None,
        }
    }

    /// Sets the GitHub token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Persists the session cache in `cache_dir` instead of memory.
    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = Some(cache_dir);
        self
    }

    /// Lists another user's repositories.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Starts in another language.
    pub fn with_language(mut self, language: String) -> Self {
        self.language = Some(language);
        self
    }

    /// Returns the config file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the GitHub token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the cache directory, if any.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Returns the username override, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the language override, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
