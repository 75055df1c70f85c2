//! Side-channel events and call outcomes exposed to the presentation layer.

use rentswipe_core::{JudgmentStatus, ListingId, RemoteStage, Verdict};
use serde::Serialize;

/// Broadcast to every subscriber of a session.
///
/// Storage failures are never reported here; they only reach the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionNotification {
    JudgmentConfirmed {
        listing_id: ListingId,
        verdict: Verdict,
    },
    JudgmentFailed {
        listing_id: ListingId,
        verdict: Verdict,
        stage: RemoteStage,
        message: String,
    },
    ResetCompleted {
        liked: usize,
    },
}

/// Why a `decide` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A judgment on the same listing has not settled yet.
    AlreadyInFlight,
    /// A reset is rebuilding the interaction set.
    ResetInProgress,
    /// The session has not finished its first build.
    NotReady,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInFlight => f.write_str("judgment already in flight"),
            Self::ResetInProgress => f.write_str("reset in progress"),
            Self::NotReady => f.write_str("session not started"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum DecisionOutcome {
    Settled(JudgmentStatus),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResetOutcome {
    Completed { liked: usize },
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetrySummary {
    pub confirmed: usize,
    pub failed: usize,
    pub skipped: usize,
}
