//! Render model for the table.

use std::borrow::Borrow;

use crate::model::Row;

use super::column::Alignment;
use super::resize::CursorStyle;
use super::sort::SortDirection;
use super::state::SortableTable;

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: u32,
    pub align: Alignment,
    pub sortable: bool,
    /// Direction indicator when this is the active sort column.
    pub sorted: Option<SortDirection>,
    /// Whether the cell has a resize handle; never on the last column.
    pub resize_handle: bool,
}

/// A rendered body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRow {
    /// Index of the row in the caller's input.
    pub index: usize,
    pub cells: Vec<String>,
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<BodyRow>),
    /// A single row spanning all columns.
    Empty { message: String, colspan: usize },
}

/// Everything a host needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    pub cursor: CursorStyle,
}

impl RenderedTable {
    /// Body rows, empty for the empty state.
    pub fn rows(&self) -> &[BodyRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }

    /// Text of one column across the body, in display order.
    pub fn column_text(&self, key: &str) -> Vec<&str> {
        let Some(i) = self.header.iter().position(|h| h.key == key) else {
            return Vec::new();
        };
        self.rows().iter().map(|r| r.cells[i].as_str()).collect()
    }
}

impl<T: Row> SortableTable<T> {
    /// Render `rows` in display order.
    pub fn render<R: Borrow<T>>(&self, rows: &[R]) -> RenderedTable {
        let last = self.columns().len().saturating_sub(1);
        let header = self
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                width: self.width(&column.key).unwrap_or_default(),
                align: column.align,
                sortable: column.sortable,
                sorted: if column.sortable {
                    self.sort_state().direction_of(&column.key)
                } else {
                    None
                },
                resize_handle: i != last,
            })
            .collect();

        let body = if rows.is_empty() {
            TableBody::Empty {
                message: self.empty_message().to_string(),
                colspan: self.columns().len(),
            }
        } else {
            TableBody::Rows(
                self.display_order(rows)
                    .into_iter()
                    .map(|index| BodyRow {
                        index,
                        cells: self
                            .columns()
                            .iter()
                            .map(|c| c.render_cell(rows[index].borrow()))
                            .collect(),
                    })
                    .collect(),
            )
        };

        RenderedTable {
            header,
            body,
            cursor: self.cursor(),
        }
    }
}
