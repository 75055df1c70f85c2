//! Per-listing judgment state machine.
//!
//! Every decision runs in two phases. `begin` is synchronous: it takes the
//! state lock, applies the optimistic mark and the in-flight marker, and
//! returns before anything awaits. The settle phase then talks to the remote
//! authority and the dislike store.

mod approve;
pub(crate) mod ledger;
mod reject;
mod retry;

use std::sync::{Arc, Mutex};

use rentswipe_core::{JudgmentStatus, ListingId, UserId, Verdict};
use rentswipe_remote::LikeAuthority;
use rentswipe_storage::DislikeStore;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::catalog::CatalogPublisher;
use crate::notification::{DecisionOutcome, IgnoreReason, SessionNotification};
use crate::state::{SessionState, lock_state};

/// What `begin` captured; the settle phase works only from this.
#[derive(Debug, Clone)]
pub(crate) struct Ticket {
    pub(crate) id: ListingId,
    pub(crate) verdict: Verdict,
    pub(crate) epoch: u64,
    pub(crate) was_liked: bool,
    pub(crate) was_disliked: bool,
}

#[derive(Clone)]
pub struct JudgmentCoordinator {
    pub(crate) user: UserId,
    pub(crate) authority: Arc<dyn LikeAuthority>,
    pub(crate) dislikes: Arc<DislikeStore>,
    pub(crate) state: Arc<Mutex<SessionState>>,
    /// Serializes every durable write of the dislike set, resets included.
    pub(crate) persist_lock: Arc<tokio::sync::Mutex<()>>,
    pub(crate) catalog: CatalogPublisher,
    pub(crate) event_tx: broadcast::Sender<SessionNotification>,
}

impl JudgmentCoordinator {
    #[must_use]
    pub(crate) fn new(
        user: UserId,
        authority: Arc<dyn LikeAuthority>,
        dislikes: Arc<DislikeStore>,
        state: Arc<Mutex<SessionState>>,
        persist_lock: Arc<tokio::sync::Mutex<()>>,
        catalog: CatalogPublisher,
        event_tx: broadcast::Sender<SessionNotification>,
    ) -> Self {
        Self { user, authority, dislikes, state, persist_lock, catalog, event_tx }
    }

    /// Apply a verdict and wait until its remote step settles.
    pub async fn decide(&self, id: &ListingId, verdict: Verdict) -> DecisionOutcome {
        match self.begin(id, verdict) {
            Ok(ticket) => DecisionOutcome::Settled(self.settle(ticket).await),
            Err(reason) => {
                tracing::debug!(listing_id = %id, %verdict, %reason, "Decision ignored");
                DecisionOutcome::Ignored(reason)
            },
        }
    }

    /// Apply a verdict and settle it in the background.
    ///
    /// The listing is already out of the candidate queue when this returns.
    pub fn submit(
        &self,
        id: &ListingId,
        verdict: Verdict,
    ) -> Result<JoinHandle<JudgmentStatus>, IgnoreReason> {
        let ticket = self.begin(id, verdict)?;
        let coordinator = self.clone();
        Ok(tokio::spawn(async move { coordinator.settle(ticket).await }))
    }

    pub(crate) fn begin(&self, id: &ListingId, verdict: Verdict) -> Result<Ticket, IgnoreReason> {
        let mut state = lock_state(&self.state);
        if state.resetting {
            return Err(IgnoreReason::ResetInProgress);
        }
        if !state.ready {
            return Err(IgnoreReason::NotReady);
        }
        if !state.in_flight.insert(id.clone()) {
            return Err(IgnoreReason::AlreadyInFlight);
        }

        let was_liked = state.interactions.is_liked(id);
        let was_disliked = state.interactions.is_disliked(id);
        if verdict == Verdict::Approve {
            state.interactions.unmark_disliked(id);
            state.interactions.mark_liked(id.clone());
        }
        state.ledger.begin(id, verdict);
        tracing::debug!(listing_id = %id, %verdict, was_liked, was_disliked, "Judgment started");

        Ok(Ticket { id: id.clone(), verdict, epoch: state.epoch, was_liked, was_disliked })
    }

    pub(crate) async fn settle(&self, ticket: Ticket) -> JudgmentStatus {
        let id = ticket.id.clone();
        let status = match ticket.verdict {
            Verdict::Approve => self.settle_approve(&ticket).await,
            Verdict::Reject => self.settle_reject(&ticket).await,
        };
        lock_state(&self.state).in_flight.remove(&id);
        status
    }

    /// Write the current dislike set unless a reset superseded `epoch`.
    pub(crate) async fn persist_dislikes(&self, epoch: u64) -> bool {
        let _guard = self.persist_lock.lock().await;
        let snapshot = {
            let state = lock_state(&self.state);
            if state.resetting || state.epoch != epoch {
                None
            } else {
                Some(state.interactions.disliked().clone())
            }
        };
        match snapshot {
            Some(ids) => {
                self.dislikes.save(&ids).await;
                true
            },
            None => {
                tracing::debug!(epoch, "Skipping dislike write from before the last reset");
                false
            },
        }
    }

    pub(crate) fn notify(&self, notification: SessionNotification) {
        if self.event_tx.send(notification).is_err() {
            tracing::trace!("No notification subscribers");
        }
    }
}
