//! Storage layer for rentswipe
//!
//! A small async key-value abstraction with a pooled `SQLite` implementation
//! and an in-memory one, plus the device-local dislike store built on top.

mod backend;
mod dislike_store;
mod error;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::KvBackend;
pub use dislike_store::DislikeStore;
pub use error::StorageError;
pub use memory::MemoryKvStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteKvStore;
pub use traits::KeyValueStore;
