//! The UI surface the controller drives.
//!
//! [`View`] abstracts the page elements (static text, search input, card list
//! and the two toggleable controls). [`PageView`] is an in-memory page that
//! frontends can display and tests can inspect.

mod page;

pub use page::{ListEntry, MessageKind, PageView, DEFAULT_STATIC_KEYS};

/// Page elements updated by [`ProjectList`](crate::ProjectList).
pub trait View {
    /// Translation keys of the elements carrying static text.
    fn static_keys(&self) -> Vec<String>;

    /// Replaces the text of the element bound to `key`.
    fn set_static_text(&mut self, key: &str, text: &str);

    /// Sets the search input's placeholder.
    fn set_search_placeholder(&mut self, text: &str);

    /// Sets the search input's value.
    fn set_search_query(&mut self, query: &str);

    /// Empties the card list area.
    fn clear_list(&mut self);

    /// Replaces the list area with a loading indicator.
    fn show_loading(&mut self, text: &str);

    /// Replaces the list area with a message.
    fn show_message(&mut self, kind: MessageKind, text: &str);

    /// Appends a rendered card to the list area.
    fn append_card(&mut self, card: String);

    /// Shows or hides the "show more" control.
    fn set_show_more_visible(&mut self, visible: bool);

    /// Shows or hides the "clear search" control.
    fn set_clear_search_visible(&mut self, visible: bool);
}
