//! UI translations.
//!
//! A catalog maps language tags (`pt-br`, `en`) to tables of UI string keys.
//! The built-in catalog is embedded at compile time; an override file can add
//! languages or replace individual strings.

mod error;

pub use error::I18nError;

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN_SOURCE: &str = "<built-in>";
const BUILTIN: &str = include_str!("translations.toml");

/// Key → text table for one language.
pub type Dictionary = BTreeMap<String, String>;

/// Translation catalog keyed by language tag.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    languages: BTreeMap<String, Dictionary>,
}

impl Translations {
    /// Returns the embedded `pt-br` / `en` catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is malformed.
    pub fn builtin() -> Result<Self, I18nError> {
        Self::parse(BUILTIN, BUILTIN_SOURCE)
    }

    /// Parses a TOML document with one table per language.
    ///
    /// `source` labels errors.
    pub fn parse(contents: &str, source: &str) -> Result<Self, I18nError> {
        let languages = toml::from_str(contents).map_err(|e| I18nError::Toml {
            path: source.to_string(),
            source: e,
        })?;
        Ok(Self { languages })
    }

    /// Loads a translations file.
    pub fn load(path: &Path) -> Result<Self, I18nError> {
        let contents = std::fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Merges `other` on top of this catalog, key by key.
    pub fn merge(&mut self, other: Translations) {
        for (lang, dictionary) in other.languages {
            debug!(lang = %lang, keys = dictionary.len(), "Merging translations");
            self.languages.entry(lang).or_default().extend(dictionary);
        }
    }

    /// Returns true if the catalog has a table for `lang`.
    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    /// Lists the available language tags.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Looks up `key` in `lang` only.
    #[must_use]
    pub fn get(&self, lang: &str, key: &str) -> Option<&str> {
        self.languages
            .get(lang)
            .and_then(|d| d.get(key))
            .map(String::as_str)
    }

    /// Looks up `key` in `lang`, then in `fallback`, then returns the key itself.
    ///
    /// Every miss is logged.
    #[must_use]
    pub fn text<'a>(&'a self, lang: &str, fallback: &str, key: &'a str) -> &'a str {
        if let Some(text) = self.get(lang, key) {
            return text;
        }
        warn!(lang, key, "Missing translation");

        if lang != fallback {
            if let Some(text) = self.get(fallback, key) {
                return text;
            }
            warn!(lang = fallback, key, "Missing fallback translation");
        }
        key
    }
}
