use rentswipe_core::{JudgmentStatus, RemoteStage, Verdict};

use super::{JudgmentCoordinator, Ticket};
use crate::notification::SessionNotification;
use crate::state::lock_state;

impl JudgmentCoordinator {
    /// Remote step of an approval. The optimistic like stays even on failure.
    pub(crate) async fn settle_approve(&self, ticket: &Ticket) -> JudgmentStatus {
        let id = &ticket.id;
        let status = match self.authority.add_like(&self.user, id).await {
            Ok(()) => {
                {
                    let mut state = lock_state(&self.state);
                    if state.epoch == ticket.epoch {
                        state.interactions.unmark_disliked(id);
                        state.interactions.mark_liked(id.clone());
                    }
                    state.ledger.confirm(id);
                }
                self.catalog.set_liked_flag(id, true);
                self.notify(SessionNotification::JudgmentConfirmed {
                    listing_id: id.clone(),
                    verdict: Verdict::Approve,
                });
                tracing::info!(listing_id = %id, "Like confirmed");
                JudgmentStatus::Confirmed
            },
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(
                    listing_id = %id,
                    error = %e,
                    "Failed to record like, keeping it locally"
                );
                lock_state(&self.state).ledger.fail(id, RemoteStage::AddLike, &message);
                self.notify(SessionNotification::JudgmentFailed {
                    listing_id: id.clone(),
                    verdict: Verdict::Approve,
                    stage: RemoteStage::AddLike,
                    message,
                });
                JudgmentStatus::Failed
            },
        };

        // The id left the dislike set in `begin`; the stored copy must follow.
        if ticket.was_disliked {
            self.persist_dislikes(ticket.epoch).await;
        }
        status
    }
}
