//! The project list state machine.
//!
//! [`ProjectList`] owns the record lists, the display cursor and the search
//! state. Every operation mutates that state and then pushes the visible
//! result to a [`View`].

use crate::cache::{load_records, store_records, SessionCache};
use crate::config::ShowcaseConfig;
use crate::fetch::{FetchError, RepositorySource};
use crate::i18n::{I18nError, Translations};
use crate::repository::RepositoryRecord;
use crate::templates::{CardLabels, CardRenderer};
use crate::view::{MessageKind, View};
use tracing::{debug, error, info, warn};

const LOADING_KEY: &str = "projects-loading";
const NOT_FOUND_KEY: &str = "projects-not-found";
const PLACEHOLDER_KEY: &str = "projects-search-placeholder";
const VIEW_LABEL_KEY: &str = "projects-view-github";
const NO_DESCRIPTION_KEY: &str = "projects-no-description";

/// Where [`ProjectList::load`] got the records from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// The session cache already held the list.
    Cache,
    /// The list was fetched and then cached.
    Network,
}

/// Progress of the one-per-session load.
#[derive(Debug, Clone)]
enum LoadState {
    Pending,
    Loaded,
    Failed(FetchError),
}

/// Paginated, searchable list of a user's repositories.
///
/// Invariant: `cursor` never exceeds the length of the active list (the
/// filtered list while a search is active, the full list otherwise).
pub struct ProjectList {
    all: Vec<RepositoryRecord>,
    filtered: Vec<RepositoryRecord>,
    search_active: bool,
    query: String,
    cursor: usize,
    increment: usize,
    lang: String,
    fallback_lang: String,
    cache_key: String,
    state: LoadState,
    translations: Translations,
    cards: CardRenderer,
}

impl ProjectList {
    /// Creates an empty list in the configured default language.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnknownLanguage`] if the catalog lacks the
    /// default language.
    pub fn new(
        config: &ShowcaseConfig,
        translations: Translations,
        cards: CardRenderer,
    ) -> Result<Self, I18nError> {
        if !translations.has_language(&config.default_language) {
            return Err(I18nError::UnknownLanguage {
                lang: config.default_language.clone(),
            });
        }
        if !translations.has_language(&config.fallback_language) {
            warn!(lang = %config.fallback_language, "Fallback language has no translations");
        }

        Ok(Self {
            all: Vec::new(),
            filtered: Vec::new(),
            search_active: false,
            query: String::new(),
            cursor: 0,
            increment: config.page_increment.max(1),
            lang: config.default_language.clone(),
            fallback_lang: config.fallback_language.clone(),
            cache_key: config.cache_key.clone(),
            state: LoadState::Pending,
            translations,
            cards,
        })
    }

    /// Number of records already shown from the active list.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cards revealed per page.
    pub fn increment(&self) -> usize {
        self.increment
    }

    /// Whether a search filter is applied.
    pub fn is_search_active(&self) -> bool {
        self.search_active
    }

    /// The current search query, empty when no search is active.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current language tag.
    pub fn language(&self) -> &str {
        &self.lang
    }

    /// The translation catalog in use.
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Every record loaded this session.
    pub fn records(&self) -> &[RepositoryRecord] {
        &self.all
    }

    /// The list pagination currently walks.
    pub fn active_records(&self) -> &[RepositoryRecord] {
        if self.search_active {
            &self.filtered
        } else {
            &self.all
        }
    }

    /// Whether more records remain to be shown.
    pub fn has_more(&self) -> bool {
        self.cursor < self.active_records().len()
    }

    /// Looks up `key` in the current language with fallback.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.text(&self.lang, &self.fallback_lang, key)
    }

    /// Loads the records from the session cache, or from `source` on a miss.
    ///
    /// On success the first page is rendered. On failure a localized error
    /// message replaces the list and the error is returned; nothing is retried.
    pub async fn load<S: RepositorySource>(
        &mut self,
        source: &S,
        cache: &mut dyn SessionCache,
        view: &mut dyn View,
    ) -> Result<LoadOrigin, FetchError> {
        self.cursor = 0;
        view.show_loading(self.text(LOADING_KEY));
        view.set_show_more_visible(false);

        if let Some(records) = load_records(cache, &self.cache_key) {
            info!(count = records.len(), "Using cached repository list");
            self.finish_load(records, view);
            return Ok(LoadOrigin::Cache);
        }

        match source.fetch_repositories().await {
            Ok(records) => {
                store_records(cache, &self.cache_key, &records);
                self.finish_load(records, view);
                Ok(LoadOrigin::Network)
            }
            Err(e) => {
                error!(error = %e, "Failed to load projects from GitHub");
                view.show_message(MessageKind::Error, self.text(e.message_key()));
                self.state = LoadState::Failed(e.clone());
                Err(e)
            }
        }
    }

    fn finish_load(&mut self, records: Vec<RepositoryRecord>, view: &mut dyn View) {
        self.all = records;
        self.state = LoadState::Loaded;
        self.render(false, view);
    }

    /// Shows the next page of the active list.
    ///
    /// With `reset` the cursor returns to zero and the list area is cleared
    /// first. An empty active list shows the "not found" message.
    pub fn render(&mut self, reset: bool, view: &mut dyn View) {
        if reset {
            self.cursor = 0;
            view.clear_list();
        }

        let total = self.active_records().len();
        if self.cursor == 0 {
            view.clear_list();
            if total == 0 {
                view.show_message(MessageKind::Info, self.text(NOT_FOUND_KEY));
                view.set_show_more_visible(false);
                return;
            }
        }

        let end = (self.cursor + self.increment).min(total);
        self.reveal_until(end, view);
    }

    /// Reveals the next page; what the "show more" control triggers.
    ///
    /// Does nothing once the active list is exhausted, so a loading, error
    /// or "not found" message stays in place.
    pub fn show_more(&mut self, view: &mut dyn View) {
        if !self.has_more() {
            debug!(cursor = self.cursor, "Nothing more to show");
            return;
        }
        self.render(false, view);
    }

    /// Appends cards for `[cursor, end)` and advances the cursor to `end`.
    fn reveal_until(&mut self, end: usize, view: &mut dyn View) {
        let records = self.active_records();
        let total = records.len();
        let start = self.cursor.min(total);
        let end = end.min(total);

        let labels = CardLabels {
            view_label: self.text(VIEW_LABEL_KEY),
            no_description: self.text(NO_DESCRIPTION_KEY),
        };
        for record in &records[start..end] {
            match self.cards.render(record, labels) {
                Ok(card) => view.append_card(card),
                Err(e) => error!(repo = %record.name, error = %e, "Failed to render card"),
            }
        }
        debug!(start, end, total, "Revealed projects");

        self.cursor = end;
        view.set_show_more_visible(end < total);
    }

    /// Filters the full list by `query` against names and descriptions.
    ///
    /// An empty (or whitespace-only) query clears the search instead. Without
    /// `reset_cursor` the number of revealed cards is kept, which is how a
    /// language switch redraws an active search.
    pub fn search(&mut self, query: &str, reset_cursor: bool, view: &mut dyn View) {
        let query = query.trim();
        let needle = query.to_lowercase();
        if needle.is_empty() {
            self.clear_search(view);
            return;
        }

        self.filtered = self
            .all
            .iter()
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect();
        self.search_active = true;
        query.clone_into(&mut self.query);
        view.set_search_query(query);
        info!(query, matches = self.filtered.len(), "Search applied");

        if reset_cursor {
            self.render(true, view);
        } else {
            let revealed = self.cursor.min(self.filtered.len());
            self.redisplay(revealed, view);
        }
        view.set_clear_search_visible(true);
    }

    /// Drops the filter and shows the full list from the start.
    pub fn clear_search(&mut self, view: &mut dyn View) {
        self.query.clear();
        view.set_search_query("");
        self.search_active = false;
        self.filtered.clear();
        self.cursor = 0;
        self.render(false, view);
        view.set_clear_search_visible(false);
    }

    /// Clears the list and reveals `revealed` records, or the first page if zero.
    fn redisplay(&mut self, revealed: usize, view: &mut dyn View) {
        self.cursor = 0;
        if revealed == 0 {
            self.render(true, view);
            return;
        }
        view.clear_list();
        self.reveal_until(revealed, view);
    }

    /// Switches language and refreshes the static text.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnknownLanguage`] and changes nothing if the
    /// catalog lacks `lang`.
    pub fn set_language(&mut self, lang: &str, view: &mut dyn View) -> Result<(), I18nError> {
        if !self.translations.has_language(lang) {
            error!(
                lang,
                available = ?self.translations.languages().collect::<Vec<_>>(),
                "No translations for language"
            );
            return Err(I18nError::UnknownLanguage {
                lang: lang.to_string(),
            });
        }

        lang.clone_into(&mut self.lang);
        self.apply_language(view);
        Ok(())
    }

    /// Writes the current language's static text and placeholder to `view`.
    ///
    /// Elements whose key is missing keep their current text.
    pub fn apply_language(&self, view: &mut dyn View) {
        for key in view.static_keys() {
            match self.translations.get(&self.lang, &key) {
                Some(text) => view.set_static_text(&key, text),
                None => warn!(
                    lang = %self.lang,
                    key = %key,
                    "Missing translation, leaving text unchanged"
                ),
            }
        }

        match self.translations.get(&self.lang, PLACEHOLDER_KEY) {
            Some(text) => view.set_search_placeholder(text),
            None => warn!(
                lang = %self.lang,
                key = PLACEHOLDER_KEY,
                "Missing translation, leaving placeholder unchanged"
            ),
        }
    }

    /// Switches language and redraws the list with the new labels.
    ///
    /// An active search is re-run keeping the revealed count; otherwise the
    /// list restarts from the first page. Before the load completes only the
    /// loading or error message is re-localized.
    pub fn on_language_change(
        &mut self,
        lang: &str,
        view: &mut dyn View,
    ) -> Result<(), I18nError> {
        self.set_language(lang, view)?;

        match self.state {
            LoadState::Pending => view.show_loading(self.text(LOADING_KEY)),
            LoadState::Failed(ref e) => {
                view.show_message(MessageKind::Error, self.text(e.message_key()));
            }
            LoadState::Loaded => {
                if self.search_active {
                    let query = self.query.clone();
                    self.search(&query, false, view);
                } else {
                    self.render(true, view);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, MemoryCache};
    use crate::view::{ListEntry, PageView};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        result: Result<Vec<RepositoryRecord>, FetchError>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn ok(records: Vec<RepositoryRecord>) -> Self {
            Self {
                result: Ok(records),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(error: FetchError) -> Self {
            Self {
                result: Err(error),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RepositorySource for FakeSource {
        async fn fetch_repositories(&self) -> Result<Vec<RepositoryRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Cache whose writes always fail.
    struct ReadOnlyCache;

    impl SessionCache for ReadOnlyCache {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: String) -> Result<(), CacheError> {
            Err(CacheError::InvalidKey {
                key: key.to_string(),
            })
        }
    }

    fn record(name: &str, description: Option<&str>) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            description: description.map(str::to_string),
            language: None,
            url: format!("https://github.com/user/{name}"),
        }
    }

    fn numbered(count: usize) -> Vec<RepositoryRecord> {
        (0..count)
            .map(|i| record(&format!("repo-{i}"), Some("demo project")))
            .collect()
    }

    fn controller_with(increment: usize) -> ProjectList {
        let config = ShowcaseConfig {
            page_increment: increment,
            ..ShowcaseConfig::default()
        };
        ProjectList::new(
            &config,
            Translations::builtin().unwrap(),
            CardRenderer::with_template("{{name}}|{{view_label}}").unwrap(),
        )
        .unwrap()
    }

    async fn loaded(records: Vec<RepositoryRecord>, increment: usize) -> (ProjectList, PageView) {
        let mut list = controller_with(increment);
        let mut page = PageView::new();
        let mut cache = MemoryCache::new();
        list.load(&FakeSource::ok(records), &mut cache, &mut page)
            .await
            .unwrap();
        (list, page)
    }

    #[tokio::test]
    async fn two_records_fit_on_first_page() {
        let records = vec![record("alpha", Some("x")), record("beta", Some("y"))];

        let (list, page) = loaded(records, 6).await;

        assert_eq!(
            page.cards().collect::<Vec<_>>(),
            vec!["alpha|Ver no GitHub", "beta|Ver no GitHub"]
        );
        assert!(!page.show_more_visible());
        assert_eq!(list.cursor(), 2);
    }

    #[tokio::test]
    async fn show_more_reveals_increment_until_exhausted() {
        let (mut list, mut page) = loaded(numbered(14), 6).await;
        assert_eq!(page.card_count(), 6);
        assert!(page.show_more_visible());

        list.show_more(&mut page);
        assert_eq!(page.card_count(), 12);
        assert!(page.show_more_visible());

        list.show_more(&mut page);
        assert_eq!(page.card_count(), 14);
        assert_eq!(list.cursor(), 14);
        assert!(!page.show_more_visible());

        // Nothing left; calling again is a no-op.
        list.show_more(&mut page);
        assert_eq!(page.card_count(), 14);
    }

    #[test]
    fn reveals_min_of_increment_and_remaining_for_any_size() {
        for increment in 1..=7 {
            for size in 0..=20 {
                let mut list = controller_with(increment);
                list.all = numbered(size);
                list.state = LoadState::Loaded;
                let mut page = PageView::new();

                list.render(true, &mut page);
                let mut shown = page.card_count();
                assert_eq!(shown, increment.min(size));

                while page.show_more_visible() {
                    list.show_more(&mut page);
                    let now = page.card_count();
                    assert_eq!(now - shown, increment.min(size - shown));
                    shown = now;
                }
                assert_eq!(shown, size);
                assert_eq!(list.cursor(), size);
            }
        }
    }

    #[tokio::test]
    async fn empty_list_shows_not_found() {
        let (list, page) = loaded(Vec::new(), 6).await;

        assert_eq!(
            page.message(),
            Some((MessageKind::Info, "Nenhum projeto encontrado."))
        );
        assert!(!page.show_more_visible());
        assert_eq!(list.cursor(), 0);
    }

    #[tokio::test]
    async fn cached_list_skips_network() {
        let mut cache = MemoryCache::new();
        store_records(&mut cache, "githubRepos", &[record("cached", None)]);
        let source = FakeSource::ok(vec![record("fresh", None)]);
        let mut list = controller_with(6);
        let mut page = PageView::new();

        let origin = list.load(&source, &mut cache, &mut page).await.unwrap();

        assert_eq!(origin, LoadOrigin::Cache);
        assert_eq!(source.calls(), 0);
        assert_eq!(page.cards().collect::<Vec<_>>(), vec!["cached|Ver no GitHub"]);
    }

    #[tokio::test]
    async fn network_result_is_cached() {
        let mut cache = MemoryCache::new();
        let source = FakeSource::ok(vec![record("fresh", None)]);
        let mut list = controller_with(6);
        let mut page = PageView::new();

        let origin = list.load(&source, &mut cache, &mut page).await.unwrap();

        assert_eq!(origin, LoadOrigin::Network);
        assert_eq!(source.calls(), 1);
        assert_eq!(
            load_records(&cache, "githubRepos"),
            Some(vec![record("fresh", None)])
        );
    }

    #[tokio::test]
    async fn failed_cache_write_still_renders() {
        let mut cache = ReadOnlyCache;
        let source = FakeSource::ok(vec![record("fresh", None)]);
        let mut list = controller_with(6);
        let mut page = PageView::new();

        let origin = list.load(&source, &mut cache, &mut page).await.unwrap();

        assert_eq!(origin, LoadOrigin::Network);
        assert_eq!(list.records().len(), 1);
        assert_eq!(page.cards().collect::<Vec<_>>(), vec!["fresh|Ver no GitHub"]);
    }

    #[tokio::test]
    async fn show_more_after_failure_keeps_error() {
        let mut cache = MemoryCache::new();
        let source = FakeSource::err(FetchError::from_status(403, "rate limited"));
        let mut list = controller_with(6);
        let mut page = PageView::new();
        list.load(&source, &mut cache, &mut page).await.unwrap_err();

        list.show_more(&mut page);

        let expected = list.translations().get("pt-br", "projects-error-limit").unwrap();
        assert_eq!(page.message(), Some((MessageKind::Error, expected)));
        assert!(!list.has_more());
    }

    #[tokio::test]
    async fn rate_limit_shows_localized_message() {
        let mut cache = MemoryCache::new();
        let source = FakeSource::err(FetchError::from_status(403, "rate limited"));
        let mut list = controller_with(6);
        let mut page = PageView::new();

        let result = list.load(&source, &mut cache, &mut page).await;

        assert!(matches!(result, Err(FetchError::RateLimited { .. })));
        let expected = list.translations().get("pt-br", "projects-error-limit").unwrap();
        assert_eq!(page.message(), Some((MessageKind::Error, expected)));
        assert_eq!(load_records(&cache, "githubRepos"), None);
    }

    #[tokio::test]
    async fn generic_failure_shows_fetch_message() {
        let mut cache = MemoryCache::new();
        let source = FakeSource::err(FetchError::from_status(500, "boom"));
        let mut list = controller_with(6);
        let mut page = PageView::new();

        list.load(&source, &mut cache, &mut page).await.unwrap_err();

        let expected = list.translations().get("pt-br", "projects-error-fetch").unwrap();
        assert_eq!(page.message(), Some((MessageKind::Error, expected)));
    }

    #[tokio::test]
    async fn language_change_after_failure_relocalizes_error() {
        let mut cache = MemoryCache::new();
        let source = FakeSource::err(FetchError::from_status(403, "rate limited"));
        let mut list = controller_with(6);
        let mut page = PageView::new();
        list.load(&source, &mut cache, &mut page).await.unwrap_err();

        list.on_language_change("en", &mut page).unwrap();

        assert_eq!(
            page.message(),
            Some((
                MessageKind::Error,
                "GitHub API rate limit reached. Please try again later."
            ))
        );
    }

    #[tokio::test]
    async fn search_filters_name_or_description() {
        let records = vec![
            record("parser-kit", None),
            record("website", Some("Personal PARSER demo")),
            record("notes", Some("markdown")),
        ];
        let (mut list, mut page) = loaded(records, 6).await;

        list.search("  Parser ", true, &mut page);

        assert!(list.is_search_active());
        assert_eq!(list.query(), "Parser");
        assert_eq!(page.query(), "Parser");
        assert_eq!(page.card_count(), 2);
        assert!(page.clear_search_visible());
    }

    #[tokio::test]
    async fn search_without_matches_shows_not_found() {
        let (mut list, mut page) = loaded(numbered(3), 6).await;

        list.search("zzz", true, &mut page);

        assert!(list.active_records().is_empty());
        assert_eq!(
            page.message(),
            Some((MessageKind::Info, "Nenhum projeto encontrado."))
        );
        assert!(!page.show_more_visible());
    }

    #[tokio::test]
    async fn blank_search_clears() {
        let (mut list, mut page) = loaded(numbered(8), 6).await;
        list.search("repo-1", true, &mut page);

        list.search("   ", true, &mut page);

        assert!(!list.is_search_active());
        assert_eq!(page.card_count(), 6);
        assert!(!page.clear_search_visible());
    }

    #[tokio::test]
    async fn clear_search_restores_full_list_from_start() {
        let (mut list, mut page) = loaded(numbered(14), 6).await;
        list.search("repo", true, &mut page);
        list.show_more(&mut page);
        assert_eq!(list.cursor(), 12);

        list.clear_search(&mut page);

        assert!(!list.is_search_active());
        assert_eq!(list.query(), "");
        assert_eq!(page.query(), "");
        assert_eq!(list.cursor(), 6);
        assert_eq!(page.card_count(), 6);
        assert!(page.show_more_visible());
        assert!(!page.clear_search_visible());
        assert_eq!(list.active_records().len(), 14);
    }

    #[tokio::test]
    async fn new_search_resets_cursor() {
        let (mut list, mut page) = loaded(numbered(14), 6).await;
        list.show_more(&mut page);
        assert_eq!(list.cursor(), 12);

        list.search("repo", true, &mut page);

        assert_eq!(list.cursor(), 6);
        assert_eq!(page.card_count(), 6);
    }

    #[tokio::test]
    async fn language_change_during_search_keeps_revealed_count() {
        let (mut list, mut page) = loaded(numbered(14), 6).await;
        list.search("repo", true, &mut page);
        list.show_more(&mut page);
        assert_eq!(page.card_count(), 12);

        list.on_language_change("en", &mut page).unwrap();

        assert!(list.is_search_active());
        assert_eq!(list.cursor(), 12);
        assert_eq!(page.card_count(), 12);
        assert!(page.cards().all(|c| c.ends_with("|View on GitHub")));
        assert!(page.show_more_visible());
        assert_eq!(page.static_text("projects-title"), Some("My Projects"));
        assert_eq!(page.placeholder(), "Search by name or description...");
    }

    #[tokio::test]
    async fn language_change_without_search_restarts() {
        let (mut list, mut page) = loaded(numbered(14), 6).await;
        list.show_more(&mut page);

        list.on_language_change("en", &mut page).unwrap();

        assert_eq!(list.language(), "en");
        assert_eq!(list.cursor(), 6);
        assert_eq!(page.card_count(), 6);
        assert!(matches!(page.entries()[0], ListEntry::Card(_)));
    }

    #[tokio::test]
    async fn unknown_language_is_rejected() {
        let (mut list, mut page) = loaded(numbered(8), 6).await;
        list.show_more(&mut page);

        let result = list.on_language_change("fr", &mut page);

        assert!(matches!(result, Err(I18nError::UnknownLanguage { .. })));
        assert_eq!(list.language(), "pt-br");
        assert_eq!(list.cursor(), 8);
    }

    #[test]
    fn missing_static_key_leaves_text_unchanged() {
        let list = controller_with(6);
        let mut page = PageView::with_static_keys(["projects-title", "nav-about"]);

        list.apply_language(&mut page);

        assert_eq!(page.static_text("projects-title"), Some("Meus Projetos"));
        assert_eq!(page.static_text("nav-about"), Some("nav-about"));
    }

    #[test]
    fn rejects_unknown_default_language() {
        let config = ShowcaseConfig {
            default_language: "fr".to_string(),
            ..ShowcaseConfig::default()
        };

        let result = ProjectList::new(
            &config,
            Translations::builtin().unwrap(),
            CardRenderer::new().unwrap(),
        );

        assert!(matches!(result, Err(I18nError::UnknownLanguage { .. })));
    }
}
