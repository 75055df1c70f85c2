use rentswipe_core::{JudgmentRecord, JudgmentStatus, Verdict};

use super::{JudgmentCoordinator, Ticket};
use crate::ServiceError;
use crate::notification::RetrySummary;
use crate::state::lock_state;

impl JudgmentCoordinator {
    /// Re-drive the remote step of every failed judgment, one at a time.
    ///
    /// # Errors
    /// Returns [`ServiceError::NotReady`] before the first build completes or
    /// while a reset runs.
    pub async fn retry_failed(&self) -> Result<RetrySummary, ServiceError> {
        let failed = {
            let state = lock_state(&self.state);
            if state.resetting {
                return Err(ServiceError::NotReady("reset in progress".to_owned()));
            }
            if !state.ready {
                return Err(ServiceError::NotReady("session not started".to_owned()));
            }
            state.ledger.with_status(JudgmentStatus::Failed)
        };

        let mut summary = RetrySummary::default();
        for record in failed {
            let Some(ticket) = self.begin_retry(&record) else {
                summary.skipped = summary.skipped.saturating_add(1);
                continue;
            };
            match self.settle(ticket).await {
                JudgmentStatus::Confirmed => {
                    summary.confirmed = summary.confirmed.saturating_add(1);
                },
                JudgmentStatus::Failed => summary.failed = summary.failed.saturating_add(1),
                JudgmentStatus::Pending => summary.skipped = summary.skipped.saturating_add(1),
            }
        }
        if summary.confirmed > 0 || summary.failed > 0 {
            tracing::info!(
                confirmed = summary.confirmed,
                failed = summary.failed,
                skipped = summary.skipped,
                "Retried failed judgments"
            );
        }
        Ok(summary)
    }

    fn begin_retry(&self, record: &JudgmentRecord) -> Option<Ticket> {
        let id = &record.listing_id;
        let mut state = lock_state(&self.state);
        if state.resetting || !state.ready {
            return None;
        }
        let still_failed =
            state.ledger.get(id).is_some_and(|current| current.status == JudgmentStatus::Failed);
        if !still_failed || !state.in_flight.insert(id.clone()) {
            return None;
        }

        let was_disliked = state.interactions.is_disliked(id);
        let was_liked = match record.verdict {
            Verdict::Approve => {
                state.interactions.unmark_disliked(id);
                state.interactions.mark_liked(id.clone());
                state.interactions.is_liked(id)
            },
            // The server may still hold the like even though local state dropped it.
            Verdict::Reject => true,
        };
        state.ledger.retry(id);
        tracing::debug!(
            listing_id = %id,
            verdict = %record.verdict,
            attempts = record.attempts,
            "Retrying judgment"
        );

        Some(Ticket {
            id: id.clone(),
            verdict: record.verdict,
            epoch: state.epoch,
            was_liked,
            was_disliked,
        })
    }
}
