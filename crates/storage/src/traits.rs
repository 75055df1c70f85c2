//! Storage trait abstraction
//!
//! The judgment core only needs a string-valued key-value slot that survives
//! restarts. Implementations decide where it lives.

use async_trait::async_trait;

use crate::error::StorageError;

/// Durable key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
