//! Translation error types.

use thiserror::Error;

/// Errors raised while loading or selecting translations.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Failed to read a translations file.
    #[error("Failed to read translations '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a translations document.
    #[error("Failed to parse translations '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The catalog has no table for the requested language.
    #[error("No translations for language '{lang}'")]
    UnknownLanguage { lang: String },
}
