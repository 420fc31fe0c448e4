//! Shared loader errors

/// Failure of a [`SharedLoader`](crate::loader::SharedLoader) initialisation.
///
/// Cloneable so that every waiter of the same in-flight load receives it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("load failed: {message}")]
pub struct LoadError {
    /// Human-readable failure message.
    pub message: String,
}

impl LoadError {
    /// Creates a new load error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wraps any displayable error.
    pub fn from_display(err: impl std::fmt::Display) -> Self {
        Self::new(err.to_string())
    }
}
