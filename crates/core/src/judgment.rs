use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::ListingId;

/// A user's decision on one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approve,
    Reject,
}

impl Verdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "like" => Ok(Self::Approve),
            "reject" | "dislike" => Ok(Self::Reject),
            other => Err(CoreError::InvalidVerdict(other.to_owned())),
        }
    }
}

/// Where a judgment stands relative to the remote authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgmentStatus {
    /// Applied locally, remote step not settled yet.
    Pending,
    /// Remote step succeeded (or none was needed).
    Confirmed,
    /// Remote step failed; local state is ahead of the server.
    Failed,
}

impl JudgmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Remote operation a judgment depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStage {
    AddLike,
    RemoveLike,
}

impl std::fmt::Display for RemoteStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddLike => f.write_str("add-like"),
            Self::RemoveLike => f.write_str("remove-like"),
        }
    }
}

/// Ledger entry for the latest judgment on a listing in this session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentRecord {
    pub listing_id: ListingId,
    pub verdict: Verdict,
    pub status: JudgmentStatus,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<RemoteStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl JudgmentRecord {
    #[must_use]
    pub fn pending(listing_id: ListingId, verdict: Verdict) -> Self {
        Self {
            listing_id,
            verdict,
            status: JudgmentStatus::Pending,
            attempts: 1,
            failed_stage: None,
            last_error: None,
            updated_at: Utc::now(),
        }
    }

    pub fn confirm(&mut self) {
        self.status = JudgmentStatus::Confirmed;
        self.failed_stage = None;
        self.last_error = None;
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, stage: RemoteStage, error: impl Into<String>) {
        self.status = JudgmentStatus::Failed;
        self.failed_stage = Some(stage);
        self.last_error = Some(error.into());
        self.updated_at = Utc::now();
    }

    pub fn retry(&mut self) {
        self.status = JudgmentStatus::Pending;
        self.attempts = self.attempts.saturating_add(1);
        self.updated_at = Utc::now();
    }
}
