//! Column definitions and per-column render/sort strategies.

use std::fmt;
use std::sync::Arc;

use crate::model::{Row, Value};

use super::sort::SortValue;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// How a column turns a field value into display text.
pub trait CellRenderer<T>: Send + Sync {
    /// Render `value` (the raw field at the column key) for `row`.
    fn render(&self, value: &Value, row: &T) -> String;
}

impl<T, F> CellRenderer<T> for F
where
    F: Fn(&Value, &T) -> String + Send + Sync,
{
    fn render(&self, value: &Value, row: &T) -> String {
        self(value, row)
    }
}

/// How a column derives the key rows are ordered by.
///
/// Returning `None` falls back to the raw field at the column key.
pub trait SortKey<T>: Send + Sync {
    fn sort_value(&self, row: &T) -> Option<SortValue>;
}

impl<T, F> SortKey<T> for F
where
    F: Fn(&T) -> Option<SortValue> + Send + Sync,
{
    fn sort_value(&self, row: &T) -> Option<SortValue> {
        self(row)
    }
}

/// The default strategy: show and sort by the raw field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    key: String,
}

impl RawField {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl<T> CellRenderer<T> for RawField {
    fn render(&self, value: &Value, _row: &T) -> String {
        value.to_string()
    }
}

impl<T: Row> SortKey<T> for RawField {
    fn sort_value(&self, row: &T) -> Option<SortValue> {
        Some(SortValue::from(&row.field(&self.key)))
    }
}

/// Column configuration.
///
/// Columns define the structure of the table: key, header text, width,
/// alignment, whether the column is sortable, and the strategies used to
/// render cells and derive sort keys.
///
/// # Examples
///
/// ```
/// use stampcard_lib::model::Record;
/// use stampcard_lib::table::{Alignment, Column, SortValue};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name", "Name").sortable().width(240),
///     Column::new("stamps", "Stamps")
///         .sortable()
///         .align(Alignment::Right)
///         .render(|value, _row| format!("{} ★", value)),
///     Column::new("email", "Email")
///         .sort_by(|row: &Record| row.get("email").map(|v| SortValue::Text(v.to_string()))),
/// ];
/// ```
pub struct Column<T> {
    /// Unique key; also the field read by default.
    pub key: String,
    /// Column header text
    pub label: String,
    /// Whether this column is sortable
    pub sortable: bool,
    /// Initial width in pixels; the table default applies when `None`.
    pub width: Option<u32>,
    /// Horizontal alignment
    pub align: Alignment,
    renderer: Arc<dyn CellRenderer<T>>,
    sorter: Arc<dyn SortKey<T>>,
}

impl<T: Row> Column<T> {
    /// Create a new column reading the field `key`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            renderer: Arc::new(RawField::new(key.clone())),
            sorter: Arc::new(RawField::new(key.clone())),
            key,
            label: label.into(),
            sortable: false,
            width: None,
            align: Alignment::Left,
        }
    }
}

impl<T> Column<T> {
    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the initial width in pixels.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Render cells with a closure.
    pub fn render<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &T) -> String + Send + Sync + 'static,
    {
        self.renderer(f)
    }

    /// Derive sort keys with a closure. `None` falls back to the raw field.
    pub fn sort_by<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Option<SortValue> + Send + Sync + 'static,
    {
        self.sort_key(f)
    }

    /// Use a cell renderer strategy.
    pub fn renderer(mut self, renderer: impl CellRenderer<T> + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Use a sort key strategy.
    pub fn sort_key(mut self, sorter: impl SortKey<T> + 'static) -> Self {
        self.sorter = Arc::new(sorter);
        self
    }
}

impl<T: Row> Column<T> {
    /// Display text for this column's cell in `row`.
    pub fn render_cell(&self, row: &T) -> String {
        self.renderer.render(&row.field(&self.key), row)
    }

    /// Sort key for `row`, falling back to the raw field.
    pub fn sort_value(&self, row: &T) -> SortValue {
        self.sorter
            .sort_value(row)
            .unwrap_or_else(|| SortValue::from(&row.field(&self.key)))
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            width: self.width,
            align: self.align,
            renderer: Arc::clone(&self.renderer),
            sorter: Arc::clone(&self.sorter),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}
