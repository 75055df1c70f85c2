use super::create_test_store;
use crate::{KeyValueStore, KvBackend, MemoryKvStore, SqliteKvStore};

#[test]
fn sqlite_set_get_remove() {
    let (store, _temp_dir) = create_test_store();

    assert_eq!(store.get_value("k").unwrap(), None);
    store.set_value("k", "v1").unwrap();
    assert_eq!(store.get_value("k").unwrap().as_deref(), Some("v1"));

    store.set_value("k", "v2").unwrap();
    assert_eq!(store.get_value("k").unwrap().as_deref(), Some("v2"));

    store.remove_value("k").unwrap();
    assert_eq!(store.get_value("k").unwrap(), None);
}

#[test]
fn sqlite_remove_absent_key_is_ok() {
    let (store, _temp_dir) = create_test_store();
    store.remove_value("missing").unwrap();
}

#[test]
fn sqlite_value_survives_reopen() {
    let (store, temp_dir) = create_test_store();
    store.set_value("k", "persisted").unwrap();
    drop(store);

    let reopened = SqliteKvStore::open(&temp_dir.path().join("state.db")).unwrap();
    assert_eq!(reopened.get_value("k").unwrap().as_deref(), Some("persisted"));
}

#[test]
fn sqlite_open_creates_parent_directories() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("state.db");
    let store = SqliteKvStore::open(&nested).unwrap();
    store.set_value("k", "v").unwrap();
    assert!(nested.exists());
}

#[tokio::test]
async fn sqlite_async_roundtrip() {
    let (store, _temp_dir) = create_test_store();
    store.set("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    store.remove("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn in_memory_sqlite_shares_one_database() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    store.set("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn memory_store_roundtrip() {
    let store = MemoryKvStore::new();
    assert!(store.is_empty().await);
    store.set("k", "v").await.unwrap();
    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    store.remove("k").await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn backend_dispatches_to_variant() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let backends =
        [KvBackend::new_sqlite(&temp_dir.path().join("b.db")).unwrap(), KvBackend::new_memory()];
    for backend in backends {
        backend.set("k", backend.kind()).await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some(backend.kind()));
    }
}
