//! Sortable, resizable data table.
//!
//! [`SortableTable`] keeps the sort column, column widths and the resize
//! gesture for a list of rows, persists widths and sort through a
//! [`SlotProvider`](crate::storage::SlotProvider), and renders rows into a
//! [`RenderedTable`].

mod column;
mod events;
mod persist;
mod render;
mod resize;
mod sort;
mod state;

pub use column::{Alignment, CellRenderer, Column, RawField, SortKey};
pub use events::{HeaderHit, RESIZE_HANDLE_WIDTH};
pub use persist::{PersistedTable, SLOT_PREFIX, TableSlot, slot_key};
pub use render::{BodyRow, HeaderCell, RenderedTable, TableBody};
pub use resize::{CursorStyle, ResizeDrag, ResizeState};
pub use sort::{SortDirection, SortState, SortValue, compare, order};
pub use state::{SortableTable, TableOptions};
