use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by core domain constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid listing id: {0:?}")]
    InvalidListingId(String),

    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("Invalid verdict: {0}")]
    InvalidVerdict(String),
}

pub type Result<T> = StdResult<T, CoreError>;
