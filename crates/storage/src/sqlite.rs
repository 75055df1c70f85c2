//! `SQLite` key-value store.
//!
//! All methods are synchronous; `sqlite_async` moves them onto the blocking
//! pool for the async [`KeyValueStore`](crate::KeyValueStore) impl.

use std::path::Path;

use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension as _, params};

use crate::error::StorageError;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

const POOL_MAX_CONNECTIONS: u32 = 4;

/// Key-value store wrapping a `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct SqliteKvStore {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

impl SqliteKvStore {
    /// Open (or create) the database file and ensure the schema exists.
    ///
    /// # Errors
    /// Fails if the parent directory cannot be created, the pool cannot open a
    /// connection, or the schema statement fails.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")
        });
        Self::from_manager(manager, POOL_MAX_CONNECTIONS)
    }

    /// In-memory database; a single pooled connection so every caller sees
    /// the same data.
    ///
    /// # Errors
    /// Fails if the connection cannot be opened.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_manager(SqliteConnectionManager::memory(), 1)
    }

    fn from_manager(
        manager: SqliteConnectionManager,
        max_size: u32,
    ) -> Result<Self, StorageError> {
        let pool = Pool::builder()
            .max_size(max_size)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;
        let store = Self { pool };
        store.conn()?.execute_batch(SCHEMA)?;
        tracing::debug!(max_size, "kv store ready");
        Ok(store)
    }

    pub(crate) fn conn(&self) -> Result<PooledConn, StorageError> {
        Ok(self.pool.get()?)
    }

    pub fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        if removed == 0 {
            tracing::debug!(key, "remove on absent key");
        }
        Ok(())
    }
}
