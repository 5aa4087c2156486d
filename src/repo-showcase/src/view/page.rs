//! In-memory page model.

use super::View;
use std::collections::BTreeMap;

/// Static text elements of the project page.
pub const DEFAULT_STATIC_KEYS: &[&str] = &[
    "projects-title",
    "projects-subtitle",
    "projects-search-btn",
    "projects-clear-btn",
    "projects-show-more",
];

/// Severity of an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Neutral notice, e.g. nothing found.
    Info,
    /// Load failure.
    Error,
}

/// One item in the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    /// Loading indicator.
    Loading(String),
    /// A rendered repository card.
    Card(String),
    /// An inline message.
    Message { kind: MessageKind, text: String },
}

/// Page state held in memory.
#[derive(Debug, Clone)]
pub struct PageView {
    static_text: BTreeMap<String, String>,
    placeholder: String,
    query: String,
    entries: Vec<ListEntry>,
    show_more_visible: bool,
    clear_search_visible: bool,
}

impl Default for PageView {
    fn default() -> Self {
        Self::with_static_keys(DEFAULT_STATIC_KEYS.iter().copied())
    }
}

impl PageView {
    /// Creates a page with the default static elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a page whose static elements are bound to `keys`.
    ///
    /// Each element starts out showing its key.
    pub fn with_static_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            static_text: keys
                .into_iter()
                .map(|k| (k.to_string(), k.to_string()))
                .collect(),
            placeholder: String::new(),
            query: String::new(),
            entries: Vec::new(),
            show_more_visible: false,
            clear_search_visible: false,
        }
    }

    /// Text currently shown by the element bound to `key`.
    pub fn static_text(&self, key: &str) -> Option<&str> {
        self.static_text.get(key).map(String::as_str)
    }

    /// Search input placeholder.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Search input value.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Everything in the list area, in display order.
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Rendered cards in display order.
    pub fn cards(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            ListEntry::Card(card) => Some(card.as_str()),
            _ => None,
        })
    }

    /// Number of cards shown.
    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// The inline message, if the list area holds one.
    pub fn message(&self) -> Option<(MessageKind, &str)> {
        self.entries.iter().find_map(|e| match e {
            ListEntry::Message { kind, text } => Some((*kind, text.as_str())),
            _ => None,
        })
    }

    /// Whether the "show more" control is visible.
    pub fn show_more_visible(&self) -> bool {
        self.show_more_visible
    }

    /// Whether the "clear search" control is visible.
    pub fn clear_search_visible(&self) -> bool {
        self.clear_search_visible
    }
}

impl View for PageView {
    fn static_keys(&self) -> Vec<String> {
        self.static_text.keys().cloned().collect()
    }

    fn set_static_text(&mut self, key: &str, text: &str) {
        if let Some(slot) = self.static_text.get_mut(key) {
            text.clone_into(slot);
        }
    }

    fn set_search_placeholder(&mut self, text: &str) {
        text.clone_into(&mut self.placeholder);
    }

    fn set_search_query(&mut self, query: &str) {
        query.clone_into(&mut self.query);
    }

    fn clear_list(&mut self) {
        self.entries.clear();
    }

    fn show_loading(&mut self, text: &str) {
        self.entries = vec![ListEntry::Loading(text.to_string())];
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.entries = vec![ListEntry::Message {
            kind,
            text: text.to_string(),
        }];
    }

    fn append_card(&mut self, card: String) {
        self.entries.push(ListEntry::Card(card));
    }

    fn set_show_more_visible(&mut self, visible: bool) {
        self.show_more_visible = visible;
    }

    fn set_clear_search_visible(&mut self, visible: bool) {
        self.clear_search_visible = visible;
    }
}
