use rentswipe_core::{JudgmentStatus, RemoteStage, Verdict};

use super::{JudgmentCoordinator, Ticket};
use crate::notification::SessionNotification;
use crate::state::lock_state;

impl JudgmentCoordinator {
    /// Remote and durable steps of a rejection.
    ///
    /// A failed remove-like does not stop the dislike from being recorded;
    /// the ledger keeps the judgment `Failed` so it can be retried.
    pub(crate) async fn settle_reject(&self, ticket: &Ticket) -> JudgmentStatus {
        let id = &ticket.id;
        let mut remote_failure = None;

        if ticket.was_liked {
            match self.authority.remove_like(&self.user, id).await {
                Ok(()) => {
                    self.catalog.set_liked_flag(id, false);
                    tracing::debug!(listing_id = %id, "Like removed");
                },
                Err(e) => {
                    tracing::warn!(
                        listing_id = %id,
                        error = %e,
                        "Failed to remove like, recording the dislike anyway"
                    );
                    remote_failure = Some(e.to_string());
                },
            }
        }

        let current = {
            let mut state = lock_state(&self.state);
            let current = state.epoch == ticket.epoch && !state.resetting;
            if current {
                state.interactions.unmark_liked(id);
                state.interactions.mark_disliked(id.clone());
            } else if ticket.was_liked && remote_failure.is_none() {
                // The rebuilt set still carries the like the server just dropped.
                state.interactions.unmark_liked(id);
            }
            match &remote_failure {
                Some(message) => state.ledger.fail(id, RemoteStage::RemoveLike, message),
                None => state.ledger.confirm(id),
            }
            current
        };

        if current {
            self.persist_dislikes(ticket.epoch).await;
        } else {
            tracing::info!(
                listing_id = %id,
                like_removed = ticket.was_liked && remote_failure.is_none(),
                "Reset ran during rejection, dislike not recorded"
            );
        }

        match remote_failure {
            Some(message) => {
                self.notify(SessionNotification::JudgmentFailed {
                    listing_id: id.clone(),
                    verdict: Verdict::Reject,
                    stage: RemoteStage::RemoveLike,
                    message,
                });
                JudgmentStatus::Failed
            },
            None => {
                self.notify(SessionNotification::JudgmentConfirmed {
                    listing_id: id.clone(),
                    verdict: Verdict::Reject,
                });
                tracing::info!(listing_id = %id, "Dislike recorded");
                JudgmentStatus::Confirmed
            },
        }
    }
}
