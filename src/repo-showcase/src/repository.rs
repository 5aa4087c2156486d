//! Repository records as returned by the GitHub API.

use serde::{Deserialize, Serialize};

/// A repository's displayable metadata.
///
/// Field names follow the GitHub REST payload so the same type deserializes
/// API responses and the session cache. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name.
    pub name: String,

    /// Free-form description, if the owner set one.
    #[serde(default)]
    pub description: Option<String>,

    /// Primary language detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,

    /// Web URL of the repository.
    #[serde(rename = "html_url")]
    pub url: String,
}

impl RepositoryRecord {
    /// Returns true if `needle` occurs in the name or description.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}
