//! One user's swipe session: the facade the presentation layer talks to.

use std::sync::{Arc, Mutex};

use rentswipe_core::{
    InteractionSet, JudgmentRecord, JudgmentStatus, ListingId, ListingRecord, UserId, Verdict,
    candidate_queue, first_valid_image, resolve_image_url,
};
use rentswipe_remote::{HttpLikeAuthority, LikeAuthority, MemoryLikeAuthority};
use rentswipe_storage::{DislikeStore, KeyValueStore, KvBackend};
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::ServiceError;
use crate::catalog::{CatalogPublisher, CatalogSubscription};
use crate::config::SessionConfig;
use crate::interaction_builder::InteractionSetBuilder;
use crate::judgment::JudgmentCoordinator;
use crate::notification::{
    DecisionOutcome, IgnoreReason, ResetOutcome, RetrySummary, SessionNotification,
};
use crate::reset::ResetController;
use crate::state::{SessionState, lock_state};

/// Catalog payloads come either as a bare array or wrapped in `listings`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Bare(Vec<ListingRecord>),
    Wrapped { listings: Vec<ListingRecord> },
}

pub struct SwipeSession {
    user: UserId,
    builder: Arc<InteractionSetBuilder>,
    coordinator: JudgmentCoordinator,
    reset: ResetController,
    catalog: CatalogPublisher,
    state: Arc<Mutex<SessionState>>,
    event_tx: broadcast::Sender<SessionNotification>,
    image_base_url: String,
}

impl SwipeSession {
    /// Session with default settings over the given backends.
    #[must_use]
    pub fn new(
        user: UserId,
        authority: Arc<dyn LikeAuthority>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self::from_parts(&SessionConfig::new(user), authority, store)
    }

    #[must_use]
    pub fn from_parts(
        config: &SessionConfig,
        authority: Arc<dyn LikeAuthority>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let dislikes = Arc::new(DislikeStore::new(store));
        let builder =
            Arc::new(InteractionSetBuilder::new(Arc::clone(&authority), Arc::clone(&dislikes)));
        let state = Arc::new(Mutex::new(SessionState::default()));
        let persist_lock = Arc::new(tokio::sync::Mutex::new(()));
        let catalog = CatalogPublisher::new();
        let (event_tx, _) = broadcast::channel(config.notification_capacity.max(1));

        let coordinator = JudgmentCoordinator::new(
            config.user.clone(),
            authority,
            Arc::clone(&dislikes),
            Arc::clone(&state),
            Arc::clone(&persist_lock),
            catalog.clone(),
            event_tx.clone(),
        );
        let reset = ResetController::new(
            config.user.clone(),
            Arc::clone(&builder),
            dislikes,
            Arc::clone(&state),
            persist_lock,
            event_tx.clone(),
        );

        Self {
            user: config.user.clone(),
            builder,
            coordinator,
            reset,
            catalog,
            state,
            event_tx,
            image_base_url: config.image_base_url.clone(),
        }
    }

    /// Open the backends named by `config`.
    ///
    /// Without a remote URL the session uses an in-memory like authority;
    /// without a database path dislikes live in memory only.
    pub fn connect(config: SessionConfig) -> Result<Self, ServiceError> {
        let authority: Arc<dyn LikeAuthority> = match config.remote.clone() {
            Some(remote) => Arc::new(HttpLikeAuthority::new(remote)?),
            None => {
                tracing::warn!("No like authority configured, likes are kept in memory");
                Arc::new(MemoryLikeAuthority::new())
            },
        };
        let backend = match &config.db_path {
            Some(path) => KvBackend::new_sqlite(path)?,
            None => KvBackend::new_memory(),
        };
        tracing::debug!(user_id = %config.user, backend = backend.kind(), "Session backends ready");
        Ok(Self::from_parts(&config, authority, Arc::new(backend)))
    }

    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Build the interaction set and open the candidate queue.
    ///
    /// No-op once the session is ready or while a reset runs.
    pub async fn start(&self) {
        {
            let state = lock_state(&self.state);
            if state.ready || state.resetting {
                return;
            }
        }
        let snapshot = self.builder.rebuild(&self.user).await;
        let mut state = lock_state(&self.state);
        if state.ready || state.resetting {
            return;
        }
        tracing::info!(
            user_id = %self.user,
            liked = snapshot.interactions.liked().len(),
            disliked = snapshot.interactions.disliked().len(),
            conflicts = snapshot.conflicts.len(),
            remote_failed = snapshot.remote_failed,
            "Session started"
        );
        state.install(snapshot);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        lock_state(&self.state).ready
    }

    /// Listings still eligible to be judged, in catalog order.
    #[must_use]
    pub fn candidate_queue(&self) -> Vec<ListingRecord> {
        let snapshot = self.catalog.snapshot();
        let state = lock_state(&self.state);
        candidate_queue(&snapshot.listings, &state.interactions, &state.in_flight, state.ready)
    }

    pub async fn decide(&self, id: &ListingId, verdict: Verdict) -> DecisionOutcome {
        self.coordinator.decide(id, verdict).await
    }

    /// Fire-and-forget variant of [`decide`](Self::decide).
    pub fn submit(
        &self,
        id: &ListingId,
        verdict: Verdict,
    ) -> Result<JoinHandle<JudgmentStatus>, IgnoreReason> {
        self.coordinator.submit(id, verdict)
    }

    pub async fn reset(&self) -> ResetOutcome {
        self.reset.reset().await
    }

    pub async fn retry_failed(&self) -> Result<RetrySummary, ServiceError> {
        self.coordinator.retry_failed().await
    }

    /// Changes on every catalog or like-state mutation.
    #[must_use]
    pub fn refresh_signal(&self) -> CatalogSubscription {
        self.catalog.subscribe()
    }

    #[must_use]
    pub fn subscribe_catalog(&self) -> CatalogSubscription {
        self.catalog.subscribe()
    }

    #[must_use]
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<SessionNotification> {
        self.event_tx.subscribe()
    }

    pub fn replace_catalog(&self, records: Vec<ListingRecord>) {
        self.catalog.replace_all(records);
    }

    /// Decode a catalog payload and publish it. Returns the listing count.
    pub fn replace_catalog_json(&self, payload: &str) -> Result<usize, ServiceError> {
        let records = match serde_json::from_str::<CatalogPayload>(payload)? {
            CatalogPayload::Bare(records) | CatalogPayload::Wrapped { listings: records } => {
                records
            },
        };
        let count = records.len();
        self.catalog.replace_all(records);
        Ok(count)
    }

    #[must_use]
    pub fn interactions(&self) -> InteractionSet {
        lock_state(&self.state).interactions.clone()
    }

    #[must_use]
    pub fn failed_judgments(&self) -> Vec<JudgmentRecord> {
        lock_state(&self.state).ledger.with_status(JudgmentStatus::Failed)
    }

    #[must_use]
    pub fn judgment(&self, id: &ListingId) -> Option<JudgmentRecord> {
        lock_state(&self.state).ledger.get(id).cloned()
    }

    /// Absolute URL of the image a card should show, if any.
    #[must_use]
    pub fn card_image(&self, record: &ListingRecord) -> Option<String> {
        first_valid_image(&record.images)
            .and_then(|piece| resolve_image_url(piece, &self.image_base_url))
    }
}
