//! Async trait implementation for `SqliteKvStore` via `spawn_blocking`.

use async_trait::async_trait;

use crate::SqliteKvStore;
use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Blocking(format!("spawn_blocking join error: {e}")))?
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let s = self.clone();
        let key = key.to_owned();
        blocking(move || s.get_value(&key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let s = self.clone();
        let key = key.to_owned();
        let value = value.to_owned();
        blocking(move || s.set_value(&key, &value)).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let s = self.clone();
        let key = key.to_owned();
        blocking(move || s.remove_value(&key)).await
    }
}
