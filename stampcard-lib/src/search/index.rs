//! Substring filter and autocomplete suggestions over row fields.

use std::collections::HashMap;

use crate::config::DEFAULT_MAX_SUGGESTIONS;
use crate::model::Row;
use crate::text::{locale_cmp, normalize};

/// A candidate autocomplete value and the field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEntry {
    /// Raw display value.
    pub label: String,
    /// Searchable field the value was found in.
    pub accessor: String,
}

impl SuggestionEntry {
    /// Creates a new suggestion.
    pub fn new(label: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accessor: accessor.into(),
        }
    }
}

/// Filtering and suggestion engine over a fixed set of searchable fields.
///
/// Matching is substring-based on [`normalize`]d text, so it ignores accents,
/// case and extra whitespace.
///
/// # Example
///
/// ```
/// use stampcard_lib::model::Record;
/// use stampcard_lib::search::SearchIndex;
///
/// let rows = vec![
///     Record::new().set("name", "Zoë").set("email", "zoe@x.com"),
///     Record::new().set("name", "Bob").set("email", "bob@x.com"),
/// ];
/// let index = SearchIndex::new(["name", "email"]);
///
/// assert_eq!(index.filter(&rows, "zoe", None).len(), 1);
/// assert_eq!(index.suggestions(&rows, "zo")[0].label, "Zoë");
/// ```
#[derive(Debug, Clone)]
pub struct SearchIndex {
    fields: Vec<String>,
    max_suggestions: usize,
}

impl SearchIndex {
    /// Creates an index searching the given fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Sets the suggestion limit.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// The searchable field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The suggestion limit.
    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Returns `true` if `row` matches `query`.
    ///
    /// With `pinned` set, only that field is checked. An empty query matches
    /// every row.
    pub fn matches<R: Row>(&self, row: &R, query: &str, pinned: Option<&str>) -> bool {
        self.matches_normalized(row, &normalize(query), pinned)
    }

    fn matches_normalized<R: Row>(&self, row: &R, needle: &str, pinned: Option<&str>) -> bool {
        if needle.is_empty() {
            return true;
        }
        let field_matches = |field: &str| normalize(&row.field(field).to_string()).contains(needle);
        match pinned {
            Some(field) => field_matches(field),
            None => self.fields.iter().any(|field| field_matches(field)),
        }
    }

    /// Returns the rows matching `query`, in input order.
    pub fn filter<'r, R: Row>(&self, rows: &'r [R], query: &str, pinned: Option<&str>) -> Vec<&'r R> {
        let needle = normalize(query);
        rows.iter()
            .filter(|row| self.matches_normalized(*row, &needle, pinned))
            .collect()
    }

    /// Computes autocomplete suggestions for `query`.
    ///
    /// Field values whose normalized form starts with the normalized query are
    /// collected once per distinct display value (the first field seen wins),
    /// exact matches are dropped, and the rest are sorted by label and capped
    /// at [`max_suggestions`](Self::max_suggestions).
    pub fn suggestions<R: Row>(&self, rows: &[R], query: &str) -> Vec<SuggestionEntry> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut found: HashMap<String, String> = HashMap::new();
        for row in rows {
            for field in &self.fields {
                let label = row.field(field).to_string();
                if label.is_empty() || found.contains_key(&label) {
                    continue;
                }
                let normalized = normalize(&label);
                if normalized.starts_with(&needle) && normalized != needle {
                    found.insert(label, field.clone());
                }
            }
        }

        let mut suggestions: Vec<SuggestionEntry> = found
            .into_iter()
            .map(|(label, accessor)| SuggestionEntry { label, accessor })
            .collect();
        suggestions.sort_by(|a, b| locale_cmp(&a.label, &b.label));
        suggestions.truncate(self.max_suggestions);

        let exact = match suggestions.as_slice() {
            [only] => only.label.to_lowercase() == query.trim().to_lowercase(),
            _ => false,
        };
        if exact {
            return Vec::new();
        }

        suggestions
    }
}
