//! Search box state: typed text, debounced query, suggestions, pinned field.

use std::time::Instant;

use log::debug;

use crate::config::SearchConfig;
use crate::model::Row;

use super::debounce::Debouncer;
use super::index::{SearchIndex, SuggestionEntry};
use super::nav::SuggestionNav;

/// A change to apply to the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchChange {
    /// The query to filter with.
    pub query: String,
    /// Field the filter is pinned to, set when a suggestion was selected.
    pub field: Option<String>,
}

/// Search input with debounced filtering and autocomplete.
///
/// `SearchBox` owns the text the user typed and the query currently applied.
/// Typing schedules the debounce; when it fires, [`tick`](Self::tick) reports
/// a [`SearchChange`] and recomputes suggestions. Selecting a suggestion skips
/// the debounce and pins the filter to the suggestion's field.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use stampcard_lib::config::SearchConfig;
/// use stampcard_lib::model::Record;
/// use stampcard_lib::search::{SearchBox, SearchIndex};
///
/// let rows = vec![
///     Record::new().set("name", "Alicia"),
///     Record::new().set("name", "Alina"),
/// ];
/// let mut search = SearchBox::new(SearchIndex::new(["name"]), &SearchConfig::default());
///
/// let now = Instant::now();
/// search.input("ali", now);
/// let change = search.tick(&rows, now + Duration::from_millis(200)).unwrap();
/// assert_eq!(change.query, "ali");
/// assert_eq!(search.suggestions().len(), 2);
///
/// let change = search.select(1).unwrap();
/// assert_eq!(change.field.as_deref(), Some("name"));
/// assert_eq!(search.filter(&rows).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SearchBox {
    index: SearchIndex,
    debouncer: Debouncer<String>,
    /// Text as typed.
    value: String,
    /// Query currently applied to the view.
    applied: String,
    /// Field the applied query is pinned to.
    pinned: Option<String>,
    /// Value for which suggestions stay hidden until the next edit.
    suppressed: Option<String>,
    suggestions: Vec<SuggestionEntry>,
    pub(super) nav: SuggestionNav,
    /// Commit produced by a key press, waiting to be taken.
    pub(super) outbox: Option<SearchChange>,
    focus_requested: bool,
}

impl SearchBox {
    /// Create a search box over `index`.
    ///
    /// The config's suggestion limit overrides the index's.
    pub fn new(index: SearchIndex, config: &SearchConfig) -> Self {
        Self {
            index: index.with_max_suggestions(config.max_suggestions),
            debouncer: Debouncer::new(config.debounce()),
            value: String::new(),
            applied: String::new(),
            pinned: None,
            suppressed: None,
            suggestions: Vec::new(),
            nav: SuggestionNav::new(),
            outbox: None,
            focus_requested: false,
        }
    }

    /// The underlying index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Text as typed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Query currently applied.
    pub fn query(&self) -> &str {
        &self.applied
    }

    /// Field the applied query is pinned to.
    pub fn pinned_field(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    /// Current suggestions.
    pub fn suggestions(&self) -> &[SuggestionEntry] {
        &self.suggestions
    }

    /// Highlighted suggestion index.
    pub fn highlighted(&self) -> Option<usize> {
        self.nav.highlighted()
    }

    /// Returns `true` while a debounced query is waiting.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending query will apply.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// The user edited the text.
    ///
    /// Unpins the field, lifts suggestion suppression and restarts the debounce.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.value = text.into();
        self.pinned = None;
        self.suppressed = None;
        self.debouncer.schedule(self.value.clone(), now);
    }

    /// Clear the text and the applied query immediately.
    pub fn clear(&mut self) -> SearchChange {
        self.debouncer.cancel();
        self.value.clear();
        self.applied.clear();
        self.pinned = None;
        self.suppressed = None;
        self.set_suggestions(Vec::new());
        self.change()
    }

    /// Drive the debounce.
    ///
    /// Returns a pending key-press commit first; otherwise, once the quiet
    /// period has passed, applies the typed query, recomputes suggestions
    /// against `rows` and returns the change.
    pub fn tick<R: Row>(&mut self, rows: &[R], now: Instant) -> Option<SearchChange> {
        if let Some(change) = self.outbox.take() {
            return Some(change);
        }
        let query = self.debouncer.poll(now)?;
        debug!("Search debounce fired: {:?}", query);
        self.applied = query;
        self.refresh(rows);
        Some(self.change())
    }

    /// Apply the pending query right away (e.g. on submit).
    pub fn flush<R: Row>(&mut self, rows: &[R]) -> Option<SearchChange> {
        let query = self.debouncer.flush()?;
        self.applied = query;
        self.refresh(rows);
        Some(self.change())
    }

    /// Recompute suggestions for the applied query, e.g. after the rows changed.
    pub fn refresh<R: Row>(&mut self, rows: &[R]) {
        if self.suppressed.as_deref() == Some(self.applied.as_str()) {
            return;
        }
        let suggestions = self.index.suggestions(rows, &self.applied);
        self.set_suggestions(suggestions);
    }

    // -------------------------------------------------------------------------
    // Suggestions
    // -------------------------------------------------------------------------

    /// Commit the suggestion at `index`.
    ///
    /// Cancels any pending debounce, sets the text to the suggestion's label
    /// and pins the filter to its field. Suggestions stay hidden for that
    /// value until the user edits the text again.
    pub fn select(&mut self, index: usize) -> Option<SearchChange> {
        let entry = self.suggestions.get(index)?.clone();
        debug!("Suggestion selected: {:?} ({})", entry.label, entry.accessor);
        self.debouncer.cancel();
        self.value = entry.label.clone();
        self.applied = entry.label.clone();
        self.pinned = Some(entry.accessor);
        self.suppressed = Some(entry.label);
        self.set_suggestions(Vec::new());
        Some(self.change())
    }

    /// Hide the suggestion list without touching the text.
    pub fn dismiss(&mut self) {
        self.set_suggestions(Vec::new());
    }

    /// Take a commit produced by [`on_key`](Self::on_key).
    pub fn take_change(&mut self) -> Option<SearchChange> {
        self.outbox.take()
    }

    fn set_suggestions(&mut self, suggestions: Vec<SuggestionEntry>) {
        if suggestions != self.suggestions {
            self.nav.reset();
        }
        self.suggestions = suggestions;
    }

    fn change(&self) -> SearchChange {
        SearchChange {
            query: self.applied.clone(),
            field: self.pinned.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Rows matching the applied query and pinned field, in input order.
    pub fn filter<'r, R: Row>(&self, rows: &'r [R]) -> Vec<&'r R> {
        self.index.filter(rows, &self.applied, self.pinned.as_deref())
    }

    // -------------------------------------------------------------------------
    // Focus control
    // -------------------------------------------------------------------------

    /// Request focus for this search box.
    pub fn focus(&mut self) {
        self.focus_requested = true;
    }

    /// Check and clear the focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}
