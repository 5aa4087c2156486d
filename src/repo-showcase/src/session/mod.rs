//! Wires configuration, collaborators and the controller into one session.

mod command;
mod config;
mod error;

pub use command::{Command, HELP};
pub use config::SessionConfig;
pub use error::SessionError;

use crate::cache::{FileCache, MemoryCache, SessionCache};
use crate::config::ShowcaseConfig;
use crate::controller::{LoadOrigin, ProjectList};
use crate::fetch::{FetchError, GithubSource, RepositorySource};
use crate::i18n::Translations;
use crate::templates::CardRenderer;
use crate::view::PageView;
use tracing::{debug, info};

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands.
    Continue,
    /// Print usage and keep reading.
    Help,
    /// End the session.
    Quit,
}

/// One interactive browsing session over a user's repositories.
pub struct Session<S = GithubSource> {
    source: S,
    cache: Box<dyn SessionCache>,
    list: ProjectList,
    page: PageView,
}

impl Session<GithubSource> {
    /// Builds a session talking to GitHub.
    ///
    /// Settings are resolved in order: `showcase.toml`, environment
    /// overrides, then the overrides in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if settings, translations, the card template,
    /// the cache directory or the API client cannot be set up.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut settings = ShowcaseConfig::load(config.config_path())?.with_env_overrides();
        if let Some(username) = config.username() {
            settings.username = username.to_string();
        }
        if let Some(language) = config.language() {
            settings.default_language = language.to_string();
        }
        settings.validate(config.config_path())?;

        let mut translations = Translations::builtin()?;
        if let Some(path) = &settings.translations_path {
            info!(path = %path.display(), "Loading extra translations");
            translations.merge(Translations::load(path)?);
        }

        let cards = match &settings.card_template_path {
            Some(path) => CardRenderer::from_file(path)?,
            None => CardRenderer::new()?,
        };

        let cache: Box<dyn SessionCache> = match config.cache_dir() {
            Some(dir) => {
                let cache = FileCache::new(dir)?;
                debug!(dir = %cache.dir().display(), "Using file session cache");
                Box::new(cache)
            }
            None => Box::new(MemoryCache::new()),
        };

        let (list, page) = prepare(&settings, translations, cards)?;
        let source = GithubSource::new(&settings, config.token())?;
        info!(username = %source.username(), lang = %settings.default_language, "Session ready");

        Ok(Self {
            source,
            cache,
            list,
            page,
        })
    }
}

/// Builds the controller and a page showing its static text.
fn prepare(
    settings: &ShowcaseConfig,
    translations: Translations,
    cards: CardRenderer,
) -> Result<(ProjectList, PageView), SessionError> {
    let list = ProjectList::new(settings, translations, cards)?;
    let mut page = PageView::new();
    list.apply_language(&mut page);
    Ok((list, page))
}

impl<S: RepositorySource> Session<S> {
    /// Builds a session from explicit collaborators.
    pub fn from_parts(
        settings: &ShowcaseConfig,
        translations: Translations,
        cards: CardRenderer,
        source: S,
        cache: Box<dyn SessionCache>,
    ) -> Result<Self, SessionError> {
        let (list, page) = prepare(settings, translations, cards)?;

        Ok(Self {
            source,
            cache,
            list,
            page,
        })
    }

    /// Loads the repository list and renders the first page.
    ///
    /// A failure is already shown on the page when this returns.
    pub async fn start(&mut self) -> Result<LoadOrigin, FetchError> {
        self.list
            .load(&self.source, &mut *self.cache, &mut self.page)
            .await
    }

    /// Applies one command to the page.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownCommand`] for unrecognized input and
    /// [`SessionError::I18n`] for an unsupported language.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        debug!(?command, "Executing command");
        match command {
            Command::More => self.list.show_more(&mut self.page),
            Command::Search(query) => self.list.search(&query, true, &mut self.page),
            Command::Clear => self.list.clear_search(&mut self.page),
            Command::Lang(lang) => self.list.on_language_change(&lang, &mut self.page)?,
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(command) => return Err(SessionError::UnknownCommand { command }),
        }
        Ok(Flow::Continue)
    }

    /// The page as it currently stands.
    pub fn page(&self) -> &PageView {
        &self.page
    }

    /// The underlying controller.
    pub fn list(&self) -> &ProjectList {
        &self.list
    }
}
