use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rentswipe_core::{InteractionSet, ListingId};

use crate::interaction_builder::InteractionSnapshot;
use crate::judgment::ledger::JudgmentLedger;

/// Mutable judgment state shared by the coordinator, reset and readers.
///
/// Guarded by a plain mutex that is never held across an `.await`.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) interactions: InteractionSet,
    /// Listings with a judgment whose remote step has not settled.
    pub(crate) in_flight: BTreeSet<ListingId>,
    pub(crate) ledger: JudgmentLedger,
    /// Gates the candidate queue until the interaction set is built.
    pub(crate) ready: bool,
    pub(crate) resetting: bool,
    /// Bumped by every reset; stale dislike writes compare against it.
    pub(crate) epoch: u64,
}

impl SessionState {
    /// Install a freshly built interaction set and open the readiness gate.
    ///
    /// Approvals still pending, or confirmed while the build ran, are
    /// re-applied so the rebuild cannot drop an optimistic mark.
    pub(crate) fn install(&mut self, snapshot: InteractionSnapshot) {
        self.interactions = snapshot.interactions;
        for id in self.ledger.live_approvals() {
            self.interactions.unmark_disliked(&id);
            self.interactions.mark_liked(id);
        }
        for id in &snapshot.conflicts {
            if !self.in_flight.contains(id) {
                self.ledger.record_conflict(id);
            }
        }
        self.ready = true;
    }
}

pub(crate) fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|e: PoisonError<_>| {
        tracing::warn!("session state lock poisoned, recovering");
        e.into_inner()
    })
}
