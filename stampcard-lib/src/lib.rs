//! Headless search and data-table engine for stampcard's admin lists.
//!
//! The crate holds the client-side state behind the customer, employee and
//! activity lists: a [`SearchBox`](search::SearchBox) that filters rows and
//! offers autocomplete suggestions, and a [`SortableTable`](table::SortableTable)
//! that sorts, resizes and renders them, remembering its layout through a
//! [`SlotStorage`](storage::SlotStorage) backend.
//!
//! Nothing here draws. Hosts feed rows, key presses, header clicks and
//! pointer positions in, and read back suggestions, filtered rows and a
//! [`RenderedTable`](table::RenderedTable).

pub mod config;
pub mod error;
pub mod input;
pub mod loader;
pub mod model;
pub mod search;
pub mod storage;
pub mod table;
pub mod text;
