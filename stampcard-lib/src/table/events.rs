//! Header clicks and pointer handling for the table.

use log::debug;

use crate::input::EventResult;
use crate::model::Row;

use super::resize::{ResizeDrag, ResizeState};
use super::state::SortableTable;

/// Width of the grab area at the right edge of a header cell, in pixels.
pub const RESIZE_HANDLE_WIDTH: u32 = 6;

/// What a pointer position over the header row lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    /// The body of the header cell at this column index.
    Cell(usize),
    /// The resize handle of the column at this index.
    Handle(usize),
}

impl<T: Row> SortableTable<T> {
    /// Find what header part sits at `x`, measured from the table's left edge.
    pub fn header_hit(&self, x: i32) -> Option<HeaderHit> {
        let x = u32::try_from(x).ok()?;
        let last = self.columns().len().saturating_sub(1);
        let mut col_x = 0u32;
        for (i, column) in self.columns().iter().enumerate() {
            let width = self.width(&column.key).unwrap_or_default();
            let end = col_x.saturating_add(width);
            if x < end {
                let on_handle = i != last && x >= end.saturating_sub(RESIZE_HANDLE_WIDTH);
                return Some(if on_handle {
                    HeaderHit::Handle(i)
                } else {
                    HeaderHit::Cell(i)
                });
            }
            col_x = end;
        }
        None
    }

    /// Handle a click on the header of `key`.
    ///
    /// A new sort column starts ascending; clicking the active one flips the
    /// direction. Unknown and non-sortable columns are ignored.
    pub fn click_header(&mut self, key: &str) -> EventResult {
        if !self.is_sortable(key) {
            return EventResult::Ignored;
        }
        self.toggle_sort(key);
        EventResult::Consumed
    }

    /// Start resizing `key` with the pointer at `x`.
    ///
    /// Ignored while another resize is active, for unknown columns and for
    /// the last column.
    pub fn begin_resize(&mut self, key: &str, x: i32) -> EventResult {
        if self.resize.is_resizing() || self.is_last_column(key) {
            return EventResult::Ignored;
        }
        let Some(start_width) = self.width(key) else {
            return EventResult::Ignored;
        };
        debug!("resize start {} at {}px", key, start_width);
        self.resize = ResizeState::Resizing(ResizeDrag {
            column: key.to_string(),
            start_x: x,
            start_width,
        });
        EventResult::StartDrag
    }

    /// Move the pointer during a resize.
    pub fn drag_to(&mut self, x: i32) -> EventResult {
        let Some(drag) = self.resize.drag() else {
            return EventResult::Ignored;
        };
        let column = drag.column.clone();
        let width = drag.width_at(x);
        self.apply_width(&column, width);
        EventResult::Consumed
    }

    /// Release the pointer, keeping the current width.
    pub fn end_resize(&mut self) -> EventResult {
        match std::mem::take(&mut self.resize) {
            ResizeState::Resizing(drag) => {
                debug!(
                    "resize end {} at {:?}px",
                    drag.column,
                    self.width(&drag.column)
                );
                EventResult::Consumed
            }
            ResizeState::Idle => EventResult::Ignored,
        }
    }

    /// Pointer pressed on the header row at `x`.
    ///
    /// Presses on a resize handle start a drag, presses on a cell sort.
    pub fn on_pointer_down(&mut self, x: i32) -> EventResult {
        match self.header_hit(x) {
            Some(HeaderHit::Handle(i)) => {
                let key = self.columns()[i].key.clone();
                self.begin_resize(&key, x)
            }
            Some(HeaderHit::Cell(i)) => {
                let key = self.columns()[i].key.clone();
                self.click_header(&key)
            }
            None => EventResult::Ignored,
        }
    }

    /// Pointer moved anywhere in the document.
    pub fn on_pointer_move(&mut self, x: i32) -> EventResult {
        self.drag_to(x)
    }

    /// Pointer released anywhere in the document.
    pub fn on_pointer_up(&mut self) -> EventResult {
        self.end_resize()
    }
}
