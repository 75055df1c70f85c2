//! Typed error enum for the remote crate.

use thiserror::Error;

/// Errors from like authority operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<RemoteError>),
}

impl RemoteError {
    /// Whether this error is transient and should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(e) => !e.is_builder() && !e.is_decode(),
            Self::HttpStatus { code, .. } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Whether the server reported the resource as absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::HttpStatus { code, .. } => *code == 404,
            Self::RetriesExhausted(inner) => inner.is_not_found(),
            _ => false,
        }
    }
}
