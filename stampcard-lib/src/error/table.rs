//! Table construction errors

/// Error type for building a [`SortableTable`](crate::table::SortableTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The table was built without any columns.
    #[error("table has no columns")]
    NoColumns,

    /// Two columns share the same key.
    #[error("column key '{key}' is used more than once")]
    DuplicateColumn { key: String },
}

impl TableError {
    /// Creates a new duplicate column error.
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }
}
