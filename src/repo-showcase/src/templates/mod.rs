//! Card rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, CardLabels, CardRenderer};
