//! Unified key-value backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::memory::MemoryKvStore;
use crate::traits::KeyValueStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            KvBackend::Sqlite(s) => {
                <crate::SqliteKvStore as KeyValueStore>::$method(s, $($arg),*).await
            },
            KvBackend::Memory(s) => <MemoryKvStore as KeyValueStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Debug)]
pub enum KvBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteKvStore),
    Memory(MemoryKvStore),
}

impl KvBackend {
    /// # Errors
    /// Propagates [`SqliteKvStore::open`](crate::SqliteKvStore::open) failures.
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::SqliteKvStore::open(db_path)?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryKvStore::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl KeyValueStore for KvBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        dispatch!(self, get(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        dispatch!(self, set(key, value))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        dispatch!(self, remove(key))
    }
}
