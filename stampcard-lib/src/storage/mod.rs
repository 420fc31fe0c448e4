//! Keyed slot storage for persisted UI state.
//!
//! A [`SlotStorage`] holds JSON text under string keys, the way browser
//! local storage does. [`SlotProvider`] wraps a backend with typed
//! serialization.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;

/// Backend trait for slot storage.
///
/// Implementations handle raw text storage/retrieval. Calls are synchronous;
/// a table reads its slot once on construction and writes it after every change.
pub trait SlotStorage: Send + Sync {
    /// Get the raw text stored under a key.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store raw text under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Get all keys starting with a prefix.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        (**self).keys_with_prefix(prefix)
    }
}

/// Typed slot provider.
///
/// Wraps a `SlotStorage` with typed serialization via serde_json.
#[derive(Clone)]
pub struct SlotProvider {
    backend: Arc<dyn SlotStorage>,
}

impl std::fmt::Debug for SlotProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotProvider").finish_non_exhaustive()
    }
}

impl SlotProvider {
    /// Create a new provider with the given backend.
    pub fn new(backend: impl SlotStorage + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a provider sharing an existing backend.
    pub fn shared(backend: Arc<dyn SlotStorage>) -> Self {
        Self { backend }
    }

    /// Get a typed value for a key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(text) => Ok(Some(
                serde_json::from_str(&text).map_err(StorageError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value).map_err(StorageError::Serialization)?;
        self.backend.set(key, &text)
    }

    /// Delete a key.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Get all keys starting with a prefix.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.backend.keys_with_prefix(prefix)
    }

    /// Access the raw backend.
    pub fn backend(&self) -> &dyn SlotStorage {
        self.backend.as_ref()
    }
}
