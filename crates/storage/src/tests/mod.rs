//! Test utilities and module declarations for storage tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rentswipe_core::ListingId;
use tempfile::TempDir;

use crate::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError};

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_store() -> (SqliteKvStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("state.db");
    let store = SqliteKvStore::open(&db_path).unwrap();
    (store, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn id(raw: &str) -> ListingId {
    ListingId::new(raw).unwrap()
}

/// Memory store whose operations can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyKvStore {
    pub inner: MemoryKvStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FlakyKvStore {
    fn failure(op: &str) -> StorageError {
        StorageError::Blocking(format!("injected {op} failure"))
    }
}

#[async_trait]
impl KeyValueStore for FlakyKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::failure("read"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::failure("write"));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::failure("remove"));
        }
        self.inner.remove(key).await
    }
}

mod kv_tests;
