//! Rows and the dynamic record type

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Field access for anything shown in a table or searched by the index.
///
/// Implement this for your own row types. Missing fields return
/// [`Value::Null`].
///
/// # Example
///
/// ```
/// use stampcard_lib::model::{Row, Value};
///
/// struct Customer {
///     name: String,
///     stamps: i64,
/// }
///
/// impl Row for Customer {
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "name" => Value::from(self.name.as_str()),
///             "stamps" => Value::from(self.stamps),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value of the field named `key`.
    fn field(&self, key: &str) -> Value;
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, key: &str) -> Value {
        (**self).field(key)
    }
}

/// A dynamic record holding field values by name.
///
/// Deserializes from a flat JSON object, so a JSON array of objects loads
/// directly into `Vec<Record>`.
///
/// # Example
///
/// ```
/// use stampcard_lib::model::{Record, Row, Value};
///
/// let record = Record::new()
///     .set("name", "Alice")
///     .set("stamps", 4i64);
///
/// assert_eq!(record.field("name"), Value::from("Alice"));
/// assert_eq!(record.field("missing"), Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, returning the record for chaining.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field names, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Row for Record {
    fn field(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or_default()
    }
}
