//! Card renderer.

use super::TemplateError;
use crate::repository::RepositoryRecord;
use handlebars::{no_escape, Handlebars};
use serde_json::json;
use std::path::Path;
use tracing::debug;

const CARD_TEMPLATE_NAME: &str = "card";
const DEFAULT_CARD_TEMPLATE: &str = include_str!("card.hbs");

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (cards are plain text by default)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Localized strings a card needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct CardLabels<'a> {
    /// Link caption, e.g. "View on GitHub".
    pub view_label: &'a str,
    /// Shown in place of a missing description.
    pub no_description: &'a str,
}

/// Renders repository records into card text.
pub struct CardRenderer {
    handlebars: Handlebars<'static>,
}

impl CardRenderer {
    /// Creates a renderer using the built-in card layout.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in template does not compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_template(DEFAULT_CARD_TEMPLATE)
    }

    /// Creates a renderer from template source.
    ///
    /// Available variables: `name`, `description`, `language`,
    /// `has_language`, `url`, `view_label`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the template does not compile.
    pub fn with_template(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(CARD_TEMPLATE_NAME, template)?;
        Ok(Self { handlebars })
    }

    /// Creates a renderer from a template file.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        debug!(path = %path.display(), "Loading card template");
        let template = std::fs::read_to_string(path).map_err(|source| TemplateError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::with_template(&template)
    }

    /// Renders one card.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(
        &self,
        record: &RepositoryRecord,
        labels: CardLabels<'_>,
    ) -> Result<String, TemplateError> {
        let data = json!({
            "name": record.name,
            "description": record.description.as_deref().unwrap_or(labels.no_description),
            "language": record.language.as_deref().unwrap_or(""),
            "has_language": record.language.is_some(),
            "url": record.url,
            "view_label": labels.view_label,
        });

        Ok(self.handlebars.render(CARD_TEMPLATE_NAME, &data)?)
    }
}
