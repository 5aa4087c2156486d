//! Showcase configuration.
//!
//! Settings come from an optional `showcase.toml`, then environment
//! overrides, then whatever the caller (usually the CLI) sets explicitly.

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Overrides [`ShowcaseConfig::username`].
pub const USERNAME_ENV: &str = "REPO_SHOWCASE_USERNAME";

/// Overrides [`ShowcaseConfig::default_language`].
pub const LANGUAGE_ENV: &str = "REPO_SHOWCASE_LANG";

/// GitHub caps `per_page` at this value.
const MAX_PER_PAGE: u8 = 100;

/// Parsed contents of `showcase.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// GitHub user whose repositories are listed.
    pub username: String,

    /// Number of cards revealed per "show more".
    pub page_increment: usize,

    /// Language tag selected at startup.
    pub default_language: String,

    /// Language consulted when a key is missing from the current one.
    pub fallback_language: String,

    /// Base URL of the GitHub REST API.
    pub api_base_url: String,

    /// Page size requested from the API.
    pub per_page: u8,

    /// Session cache key holding the serialized record list.
    pub cache_key: String,

    /// Extra translations merged over the built-in catalog.
    pub translations_path: Option<PathBuf>,

    /// Handlebars template replacing the built-in card layout.
    pub card_template_path: Option<PathBuf>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            username: "joaomarcianodev".to_string(),
            page_increment: 6,
            default_language: "pt-br".to_string(),
            fallback_language: "en".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            per_page: MAX_PER_PAGE,
            cache_key: "githubRepos".to_string(),
            translations_path: None,
            card_template_path: None,
        }
    }
}

impl ShowcaseConfig {
    /// Loads the config file, falling back to defaults when it does not exist.
    ///
    /// Relative `translations-path` and `card-template-path` values are
    /// resolved against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            let config = Self::default();
            config.validate(path)?;
            return Ok(config);
        }

        info!(path = %path.display(), "Loading config");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
            path: path.display().to_string(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.translations_path = config.translations_path.map(|p| base.join(p));
        config.card_template_path = config.card_template_path.map(|p| base.join(p));

        config.validate(path)?;
        Ok(config)
    }

    /// Applies `REPO_SHOWCASE_USERNAME` and `REPO_SHOWCASE_LANG` if set.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(username) = non_empty_env(USERNAME_ENV) {
            debug!(username = %username, "Username overridden from environment");
            self.username = username;
        }
        if let Some(lang) = non_empty_env(LANGUAGE_ENV) {
            debug!(lang = %lang, "Language overridden from environment");
            self.default_language = lang;
        }
        self
    }

    /// Validates the settings.
    ///
    /// `path` is only used to label errors.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        let username = self.username.trim();
        if username.is_empty() {
            return Err(invalid("username must not be empty".to_string()));
        }
        if username.contains('/') {
            return Err(invalid("username must not contain '/'".to_string()));
        }

        if self.page_increment == 0 {
            return Err(invalid("page-increment must be at least 1".to_string()));
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(invalid(format!(
                "per-page must be between 1 and {MAX_PER_PAGE}"
            )));
        }

        if self.default_language.trim().is_empty() || self.fallback_language.trim().is_empty() {
            return Err(invalid("language tags must not be empty".to_string()));
        }

        if self.cache_key.trim().is_empty() {
            return Err(invalid("cache-key must not be empty".to_string()));
        }

        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(invalid(format!(
                    "api-base-url is not a valid http(s) URL: {}",
                    self.api_base_url
                )))
            }
        }

        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
