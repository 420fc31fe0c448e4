//! Persisted table state: column widths and sort, stored as one JSON blob.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::MIN_COLUMN_WIDTH;
use crate::storage::SlotProvider;

use super::sort::SortDirection;

/// Namespace for table slots.
pub const SLOT_PREFIX: &str = "datatable:";

/// Storage slot key for a table.
pub fn slot_key(storage_key: &str) -> String {
    format!("{}{}", SLOT_PREFIX, storage_key)
}

/// Persisted table state.
///
/// ```json
/// {"widths":{"name":240},"sortKey":"email","sortDirection":"desc"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedTable {
    #[serde(deserialize_with = "lenient_widths")]
    pub widths: BTreeMap<String, u32>,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
}

/// Read widths, dropping entries that are not non-negative numbers and
/// clamping the rest to the column floor.
fn lenient_widths<'de, D>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| {
            let width = value.as_f64().filter(|w| w.is_finite() && *w >= 0.0)?;
            let width = width.round().min(f64::from(u32::MAX)) as u32;
            Some((key, width.max(MIN_COLUMN_WIDTH)))
        })
        .collect())
}

/// A table's handle on its storage slot.
#[derive(Debug, Clone)]
pub struct TableSlot {
    provider: SlotProvider,
    key: String,
}

impl TableSlot {
    pub fn new(provider: SlotProvider, storage_key: &str) -> Self {
        Self {
            provider,
            key: slot_key(storage_key),
        }
    }

    /// Full slot key, including the namespace.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored blob. Missing, corrupt or unreadable state is `None`.
    pub fn read(&self) -> Option<PersistedTable> {
        match self.provider.get::<PersistedTable>(&self.key) {
            Ok(Some(state)) => {
                debug!("hydrated table state from {}", self.key);
                Some(state)
            }
            Ok(None) => {
                debug!("no stored table state at {}", self.key);
                None
            }
            Err(e) => {
                warn!("ignoring stored table state at {}: {}", self.key, e);
                None
            }
        }
    }

    /// Write the blob, logging failures.
    pub fn write(&self, state: &PersistedTable) {
        if let Err(e) = self.provider.set(&self.key, state) {
            warn!("failed to persist table state at {}: {}", self.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_blob() {
        let state: PersistedTable = serde_json::from_str(
            r#"{"widths":{"name":240,"email":90.6},"sortKey":"email","sortDirection":"desc"}"#,
        )
        .unwrap();
        assert_eq!(state.widths["name"], 240);
        assert_eq!(state.widths["email"], MIN_COLUMN_WIDTH);
        assert_eq!(state.sort_key.as_deref(), Some("email"));
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn tolerates_missing_and_bad_fields() {
        let state: PersistedTable =
            serde_json::from_str(r#"{"widths":{"name":"wide","city":-4,"zip":130}}"#).unwrap();
        assert_eq!(state.widths.len(), 1);
        assert_eq!(state.widths["zip"], 130);
        assert_eq!(state.sort_key, None);
        assert_eq!(state.sort_direction, SortDirection::Asc);

        let state: PersistedTable = serde_json::from_str(r#"{"widths":null}"#).unwrap();
        assert!(state.widths.is_empty());
    }

    #[test]
    fn writes_the_same_shape() {
        let state = PersistedTable {
            widths: BTreeMap::from([("name".to_string(), 200)]),
            sort_key: Some("name".into()),
            sort_direction: SortDirection::Asc,
        };
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"widths":{"name":200},"sortKey":"name","sortDirection":"asc"}"#
        );
    }
}
