//! Tests for persisted table state and the slot storage backends.

use stampcard_lib::config::{DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};
use stampcard_lib::error::StorageError;
use stampcard_lib::model::Record;
use stampcard_lib::storage::{MemoryStorage, SlotProvider, SlotStorage, SqliteStorage};
use stampcard_lib::table::{Column, PersistedTable, SortDirection, SortableTable, TableOptions};

const SLOT: &str = "datatable:customers";

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email").sortable(),
        Column::new("stamps", "Stamps"),
    ]
}

fn options(respect_stored_sort: bool) -> TableOptions {
    TableOptions::new()
        .storage_key("customers")
        .respect_stored_sort(respect_stored_sort)
        .default_sort("name", SortDirection::Asc)
}

fn open(provider: &SlotProvider, respect_stored_sort: bool) -> SortableTable<Record> {
    SortableTable::with_storage(columns(), options(respect_stored_sort), provider.clone()).unwrap()
}

/// Resize `name` to 240px and sort by email descending.
fn customize(table: &mut SortableTable<Record>) {
    table.begin_resize("name", 0);
    table.drag_to(90);
    table.end_resize();
    table.click_header("email");
    table.click_header("email");
}

fn stored(provider: &SlotProvider) -> PersistedTable {
    provider.get(SLOT).unwrap().unwrap()
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_round_trip_with_stored_sort() {
    let provider = SlotProvider::new(MemoryStorage::new());
    let mut table = open(&provider, true);
    customize(&mut table);

    let restored = open(&provider, true);
    assert_eq!(restored.width("name"), Some(240));
    assert_eq!(restored.sort_key(), Some("email"));
    assert_eq!(restored.sort_direction(), SortDirection::Desc);
}

#[test]
fn test_opt_out_keeps_default_sort_but_restores_widths() {
    let provider = SlotProvider::new(MemoryStorage::new());
    let mut table = open(&provider, false);
    customize(&mut table);

    let restored = open(&provider, false);
    assert_eq!(restored.width("name"), Some(240));
    assert_eq!(restored.sort_key(), Some("name"));
    assert_eq!(restored.sort_direction(), SortDirection::Asc);
}

#[test]
fn test_blob_shape() {
    let provider = SlotProvider::new(MemoryStorage::new());
    let mut table = open(&provider, true);
    customize(&mut table);

    let raw = provider.backend().get(SLOT).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["widths"]["name"], 240);
    assert_eq!(json["widths"]["email"], DEFAULT_COLUMN_WIDTH);
    assert_eq!(json["sortKey"], "email");
    assert_eq!(json["sortDirection"], "desc");
}

// =============================================================================
// Hydration
// =============================================================================

#[test]
fn test_construction_does_not_write() {
    let storage = std::sync::Arc::new(MemoryStorage::new());
    let provider = SlotProvider::shared(storage.clone());
    let table = open(&provider, true);

    assert!(table.is_hydrated());
    assert!(storage.is_empty());
}

#[test]
fn test_every_change_is_written() {
    let provider = SlotProvider::new(MemoryStorage::new());
    let mut table = open(&provider, true);

    table.click_header("email");
    assert_eq!(stored(&provider).sort_key.as_deref(), Some("email"));

    table.begin_resize("name", 0);
    table.drag_to(10);
    // Written during the drag, before release
    assert_eq!(stored(&provider).widths["name"], 160);
    table.drag_to(20);
    assert_eq!(stored(&provider).widths["name"], 170);
    table.end_resize();
}

#[test]
fn test_stored_widths_are_clamped() {
    let provider = SlotProvider::new(MemoryStorage::new());
    provider
        .backend()
        .set(SLOT, r#"{"widths":{"name":12,"email":300}}"#)
        .unwrap();

    let table = open(&provider, true);
    assert_eq!(table.width("name"), Some(MIN_COLUMN_WIDTH));
    assert_eq!(table.width("email"), Some(300));
    assert_eq!(table.width("stamps"), Some(DEFAULT_COLUMN_WIDTH));
}

#[test]
fn test_corrupt_blob_falls_back_to_defaults() {
    let provider = SlotProvider::new(MemoryStorage::new());
    provider.backend().set(SLOT, "{not json").unwrap();

    let mut table = open(&provider, true);
    assert_eq!(table.width("name"), Some(DEFAULT_COLUMN_WIDTH));
    assert_eq!(table.sort_key(), Some("name"));

    // The next change replaces the corrupt blob
    table.click_header("email");
    assert_eq!(stored(&provider).sort_key.as_deref(), Some("email"));
}

#[test]
fn test_invalid_stored_sort_is_ignored() {
    let provider = SlotProvider::new(MemoryStorage::new());
    // "stamps" exists but is not sortable here
    provider
        .backend()
        .set(SLOT, r#"{"widths":{},"sortKey":"stamps","sortDirection":"desc"}"#)
        .unwrap();
    let table = open(&provider, true);
    assert_eq!(table.sort_key(), Some("name"));
    assert_eq!(table.sort_direction(), SortDirection::Asc);

    provider
        .backend()
        .set(SLOT, r#"{"widths":{},"sortKey":"deleted","sortDirection":"desc"}"#)
        .unwrap();
    let table = open(&provider, true);
    assert_eq!(table.sort_key(), Some("name"));
}

#[test]
fn test_without_storage_key_nothing_is_written() {
    let storage = std::sync::Arc::new(MemoryStorage::new());
    let provider = SlotProvider::shared(storage.clone());
    let mut table =
        SortableTable::with_storage(columns(), TableOptions::new(), provider).unwrap();

    assert!(!table.is_persistent());
    table.click_header("name");
    assert!(storage.is_empty());
}

// =============================================================================
// Orphaned widths
// =============================================================================

#[test]
fn test_orphaned_widths_survive_until_pruned() {
    let provider = SlotProvider::new(MemoryStorage::new());
    provider
        .backend()
        .set(SLOT, r#"{"widths":{"name":200,"phone":180}}"#)
        .unwrap();

    let mut table = open(&provider, true);
    assert_eq!(table.orphaned_widths(), vec!["phone"]);
    assert!(table.widths().get("phone").is_none());

    table.click_header("email");
    assert_eq!(stored(&provider).widths.get("phone"), Some(&180));

    assert_eq!(table.prune_orphaned_widths(), 1);
    assert!(table.orphaned_widths().is_empty());
    assert_eq!(stored(&provider).widths.get("phone"), None);
    assert_eq!(table.prune_orphaned_widths(), 0);
}

// =============================================================================
// Failing storage
// =============================================================================

struct BrokenStorage;

impl SlotStorage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io(std::io::Error::other("unavailable")))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("quota exceeded")))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }
}

#[test]
fn test_storage_failures_are_swallowed() {
    let provider = SlotProvider::new(BrokenStorage);
    let mut table = open(&provider, true);

    assert_eq!(table.sort_key(), Some("name"));
    table.click_header("name");
    assert_eq!(table.sort_direction(), SortDirection::Desc);
    table.begin_resize("name", 0);
    table.drag_to(30);
    table.end_resize();
    assert_eq!(table.width("name"), Some(180));
}

// =============================================================================
// Backends
// =============================================================================

#[test]
fn test_memory_storage_prefix_listing() {
    let storage = MemoryStorage::new();
    storage.set("datatable:b", "{}").unwrap();
    storage.set("datatable:a", "{}").unwrap();
    storage.set("other", "{}").unwrap();

    assert_eq!(
        storage.keys_with_prefix("datatable:").unwrap(),
        vec!["datatable:a", "datatable:b"]
    );
    storage.remove("datatable:a").unwrap();
    assert_eq!(storage.get("datatable:a").unwrap(), None);
    assert_eq!(storage.len(), 2);
}

#[test]
fn test_sqlite_storage_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tables.db");

    {
        let provider = SlotProvider::new(SqliteStorage::open(&path).unwrap());
        let mut table = open(&provider, true);
        customize(&mut table);
    }

    let provider = SlotProvider::new(SqliteStorage::open(&path).unwrap());
    let table = open(&provider, true);
    assert_eq!(table.width("name"), Some(240));
    assert_eq!(table.sort_key(), Some("email"));
    assert_eq!(table.sort_direction(), SortDirection::Desc);
    assert_eq!(provider.keys_with_prefix("datatable:").unwrap(), vec![SLOT]);
}

#[test]
fn test_sqlite_storage_overwrites_and_removes() {
    let storage = SqliteStorage::in_memory().unwrap();
    storage.set("k", "1").unwrap();
    storage.set("k", "2").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));
    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
}
