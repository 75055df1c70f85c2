//! Typed error enum for the service layer.
//!
//! Judgments and resets never fail from the caller's point of view; these
//! errors come from wiring a session to its backends and from catalog input.

use rentswipe_core::CoreError;
use rentswipe_remote::RemoteError;
use rentswipe_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying remote, storage and input failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Remote like authority could not be set up or reached.
    #[error("remote: {0}")]
    Remote(#[from] RemoteError),

    /// Durable storage could not be opened.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (blank ids, unknown verdicts).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CoreError),

    /// Session has not finished its first build, or a reset is running.
    #[error("session not ready: {0}")]
    NotReady(String),

    /// Required backend is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Catalog payload could not be decoded.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Remote(e) => e.is_transient(),
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }
}
