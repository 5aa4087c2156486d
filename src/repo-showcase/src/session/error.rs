//! Session error types.

/// Errors that can occur while building or driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Translation loading or language selection errors.
    #[error(transparent)]
    I18n(#[from] crate::i18n::I18nError),

    /// Card template errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Session cache setup errors.
    #[error(transparent)]
    Cache(#[from] crate::cache::CacheError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Input that is not a known command.
    #[error("Unknown command '{command}'")]
    UnknownCommand { command: String },
}
