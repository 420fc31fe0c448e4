//! Sortable, resizable table state.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::config::{MIN_COLUMN_WIDTH, TableConfig};
use crate::error::TableError;
use crate::model::Row;
use crate::storage::SlotProvider;

use super::column::Column;
use super::persist::{PersistedTable, TableSlot};
use super::resize::{CursorStyle, ResizeState};
use super::sort::{self, SortDirection, SortState};

/// Options for building a [`SortableTable`].
///
/// # Example
///
/// ```
/// use stampcard_lib::table::{SortDirection, TableOptions};
///
/// let options = TableOptions::new()
///     .storage_key("customers")
///     .respect_stored_sort(true)
///     .default_sort("name", SortDirection::Asc)
///     .empty_message("No customers yet");
/// ```
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Persist widths and sort under this key. `None` disables persistence.
    pub storage_key: Option<String>,
    /// Restore the stored sort on construction.
    pub respect_stored_sort: bool,
    /// Sort used when nothing is restored.
    pub default_sort: SortState,
    /// Width for columns without an explicit width.
    pub default_column_width: u32,
    /// Message for the empty-state row.
    pub empty_message: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded from the table config.
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            storage_key: None,
            respect_stored_sort: false,
            default_sort: SortState::unsorted(),
            default_column_width: config.default_column_width.max(MIN_COLUMN_WIDTH),
            empty_message: config.empty_message.clone(),
        }
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn respect_stored_sort(mut self, respect: bool) -> Self {
        self.respect_stored_sort = respect;
        self
    }

    pub fn default_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = SortState::by(key, direction);
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

/// Display and interaction state for a data table.
///
/// Holds the sort column and direction, the column widths and the resize
/// gesture. With a storage key, widths and sort are read once on
/// construction and written back after every change.
///
/// # Example
///
/// ```
/// use stampcard_lib::model::Record;
/// use stampcard_lib::table::{Column, SortDirection, SortableTable, TableOptions};
///
/// let rows = vec![
///     Record::new().set("name", "alice"),
///     Record::new().set("name", "Bob"),
/// ];
/// let mut table = SortableTable::new(
///     vec![Column::new("name", "Name").sortable()],
///     TableOptions::new().default_sort("name", SortDirection::Asc),
/// )
/// .unwrap();
///
/// assert_eq!(table.display_order(&rows), vec![0, 1]);
/// table.click_header("name");
/// assert_eq!(table.display_order(&rows), vec![1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct SortableTable<T> {
    columns: Vec<Column<T>>,
    widths: BTreeMap<String, u32>,
    /// Stored widths for columns this table does not have.
    orphans: BTreeMap<String, u32>,
    sort: SortState,
    default_sort: SortState,
    pub(super) resize: ResizeState,
    slot: Option<TableSlot>,
    hydrated: bool,
    empty_message: String,
}

impl<T: Row> SortableTable<T> {
    /// Build a table without persistence.
    pub fn new(columns: Vec<Column<T>>, options: TableOptions) -> Result<Self, TableError> {
        Self::build(columns, options, None)
    }

    /// Build a table persisting to `storage` when `options.storage_key` is set.
    pub fn with_storage(
        columns: Vec<Column<T>>,
        options: TableOptions,
        storage: SlotProvider,
    ) -> Result<Self, TableError> {
        Self::build(columns, options, Some(storage))
    }

    fn build(
        columns: Vec<Column<T>>,
        options: TableOptions,
        storage: Option<SlotProvider>,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(TableError::duplicate(&column.key));
            }
        }

        let widths = columns
            .iter()
            .map(|c| {
                let width = c.width.unwrap_or(options.default_column_width);
                (c.key.clone(), width.max(MIN_COLUMN_WIDTH))
            })
            .collect();
        let slot = match (storage, options.storage_key.as_deref()) {
            (Some(provider), Some(key)) => Some(TableSlot::new(provider, key)),
            _ => None,
        };

        let mut table = Self {
            columns,
            widths,
            orphans: BTreeMap::new(),
            sort: options.default_sort.clone(),
            default_sort: options.default_sort,
            resize: ResizeState::Idle,
            slot,
            hydrated: false,
            empty_message: options.empty_message,
        };
        table.hydrate(options.respect_stored_sort);
        Ok(table)
    }

    /// Merge stored state into the initial state. Writes are allowed afterwards.
    fn hydrate(&mut self, respect_stored_sort: bool) {
        let stored = self.slot.as_ref().and_then(TableSlot::read);
        if let Some(stored) = stored {
            for (key, width) in stored.widths {
                match self.widths.get_mut(&key) {
                    Some(current) => *current = width.max(MIN_COLUMN_WIDTH),
                    None => {
                        self.orphans.insert(key, width);
                    }
                }
            }
            if respect_stored_sort {
                match stored.sort_key {
                    Some(key) if self.is_sortable(&key) => {
                        debug!("restored sort {} {:?}", key, stored.sort_direction);
                        self.sort = SortState::by(key, stored.sort_direction);
                    }
                    Some(key) => debug!("ignoring stored sort on unknown column {}", key),
                    None => {}
                }
            }
        }
        self.hydrated = true;
    }

    /// Write the current state to storage once hydration is done.
    pub(super) fn persist(&self) {
        if !self.hydrated {
            return;
        }
        if let Some(slot) = &self.slot {
            slot.write(&self.snapshot());
        }
    }

    /// The state that gets persisted.
    pub fn snapshot(&self) -> PersistedTable {
        let mut widths = self.orphans.clone();
        widths.extend(self.widths.iter().map(|(k, w)| (k.clone(), *w)));
        PersistedTable {
            widths,
            sort_key: self.sort.sort_key.clone(),
            sort_direction: self.sort.sort_direction,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns `true` if `key` names a sortable column.
    pub fn is_sortable(&self, key: &str) -> bool {
        self.column(key).is_some_and(|c| c.sortable)
    }

    pub(super) fn is_last_column(&self, key: &str) -> bool {
        self.columns.last().is_some_and(|c| c.key == key)
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort.sort_direction
    }

    /// Width of a column in pixels.
    pub fn width(&self, key: &str) -> Option<u32> {
        self.widths.get(key).copied()
    }

    /// Widths of the table's columns.
    pub fn widths(&self) -> &BTreeMap<String, u32> {
        &self.widths
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Returns `true` if the table persists its state.
    pub fn is_persistent(&self) -> bool {
        self.slot.is_some()
    }

    pub fn resize_state(&self) -> &ResizeState {
        &self.resize
    }

    /// Cursor the host should show.
    pub fn cursor(&self) -> CursorStyle {
        self.resize.cursor()
    }

    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Set a column width directly, clamped to the floor.
    pub fn set_width(&mut self, key: &str, width: u32) -> bool {
        let Some(current) = self.widths.get_mut(key) else {
            return false;
        };
        *current = width.max(MIN_COLUMN_WIDTH);
        self.persist();
        true
    }

    /// Go back to the default sort.
    pub fn reset_sort(&mut self) {
        if self.sort != self.default_sort {
            debug!("sort reset to {:?}", self.default_sort);
            self.sort = self.default_sort.clone();
            self.persist();
        }
    }

    pub(super) fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
        debug!("sort {} {:?}", key, self.sort.sort_direction);
        self.persist();
    }

    pub(super) fn apply_width(&mut self, key: &str, width: u32) {
        match self.widths.get_mut(key) {
            Some(current) if *current != width => *current = width,
            _ => return,
        }
        self.persist();
    }

    // -------------------------------------------------------------------------
    // Orphaned widths
    // -------------------------------------------------------------------------

    /// Stored width entries for columns this table no longer has.
    pub fn orphaned_widths(&self) -> Vec<&str> {
        self.orphans.keys().map(String::as_str).collect()
    }

    /// Drop orphaned width entries from storage. Returns how many were removed.
    pub fn prune_orphaned_widths(&mut self) -> usize {
        let removed = self.orphans.len();
        if removed > 0 {
            debug!("pruning {} orphaned widths", removed);
            self.orphans.clear();
            self.persist();
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------------

    /// Indices into `rows` in display order.
    ///
    /// Rows keep their input order without an active sort on a sortable column.
    pub fn display_order<R: Borrow<T>>(&self, rows: &[R]) -> Vec<usize> {
        let column = self
            .sort
            .sort_key
            .as_deref()
            .and_then(|key| self.column(key))
            .filter(|c| c.sortable);
        match column {
            Some(column) => {
                let keys: Vec<_> = rows.iter().map(|r| column.sort_value(r.borrow())).collect();
                sort::order(&keys, self.sort.sort_direction)
            }
            None => (0..rows.len()).collect(),
        }
    }

    /// Rows in display order.
    pub fn sorted_rows<'r, R: Borrow<T>>(&self, rows: &'r [R]) -> Vec<&'r R> {
        self.display_order(rows).into_iter().map(|i| &rows[i]).collect()
    }
}
