use std::sync::{Arc, Mutex};

use rentswipe_core::UserId;
use rentswipe_storage::DislikeStore;
use tokio::sync::broadcast;

use crate::interaction_builder::InteractionSetBuilder;
use crate::notification::{ResetOutcome, SessionNotification};
use crate::state::{SessionState, lock_state};

/// Wipes local judgments and rebuilds the interaction set from the server.
///
/// Single-flight: while one reset runs, further resets and new decisions are
/// turned away and the candidate queue stays empty.
#[derive(Clone)]
pub struct ResetController {
    user: UserId,
    builder: Arc<InteractionSetBuilder>,
    dislikes: Arc<DislikeStore>,
    state: Arc<Mutex<SessionState>>,
    persist_lock: Arc<tokio::sync::Mutex<()>>,
    event_tx: broadcast::Sender<SessionNotification>,
}

impl ResetController {
    #[must_use]
    pub(crate) fn new(
        user: UserId,
        builder: Arc<InteractionSetBuilder>,
        dislikes: Arc<DislikeStore>,
        state: Arc<Mutex<SessionState>>,
        persist_lock: Arc<tokio::sync::Mutex<()>>,
        event_tx: broadcast::Sender<SessionNotification>,
    ) -> Self {
        Self { user, builder, dislikes, state, persist_lock, event_tx }
    }

    pub async fn reset(&self) -> ResetOutcome {
        let epoch = {
            let mut state = lock_state(&self.state);
            if state.resetting {
                tracing::debug!("Reset already running");
                return ResetOutcome::AlreadyRunning;
            }
            state.resetting = true;
            state.ready = false;
            state.epoch = state.epoch.saturating_add(1);
            state.interactions.clear();
            state.ledger.retain_pending();
            state.epoch
        };
        tracing::info!(user_id = %self.user, epoch, "Resetting judgments");

        {
            let _guard = self.persist_lock.lock().await;
            self.dislikes.clear().await;
        }

        let snapshot = self.builder.rebuild(&self.user).await;
        let liked = snapshot.interactions.liked().len();
        {
            let mut state = lock_state(&self.state);
            state.install(snapshot);
            state.resetting = false;
        }

        if self.event_tx.send(SessionNotification::ResetCompleted { liked }).is_err() {
            tracing::trace!("No notification subscribers");
        }
        tracing::info!(liked, "Reset completed");
        ResetOutcome::Completed { liked }
    }
}
