//! Shared catalog store read by every listing surface of the app.
//!
//! Readers hold a [`CatalogSubscription`] and only ever see immutable
//! snapshots. Writes go through [`CatalogPublisher::replace_all`] (catalog
//! refetch) or the crate-private like-flag setter used by the judgment
//! coordinator.

use std::sync::Arc;

use rentswipe_core::{ListingId, ListingRecord};
use tokio::sync::watch;

/// What caused the latest generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    Initial,
    Replaced { count: usize },
    LikeChanged { listing_id: ListingId, liked: bool },
}

#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub listings: Arc<[ListingRecord]>,
    /// Increases on every published change; doubles as the refresh signal.
    pub generation: u64,
    pub last_change: CatalogChange,
}

impl CatalogSnapshot {
    fn empty() -> Self {
        Self { listings: Arc::from(Vec::new()), generation: 0, last_change: CatalogChange::Initial }
    }

    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<&ListingRecord> {
        self.listings.iter().find(|l| &l.id == id)
    }

    /// The "my liked listings" view.
    #[must_use]
    pub fn liked_listings(&self) -> Vec<ListingRecord> {
        self.listings.iter().filter(|l| l.liked_by_current_user).cloned().collect()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogPublisher {
    tx: Arc<watch::Sender<CatalogSnapshot>>,
}

impl Default for CatalogPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogPublisher {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CatalogSnapshot::empty());
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn subscribe(&self) -> CatalogSubscription {
        CatalogSubscription { rx: self.tx.subscribe() }
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.tx.borrow().clone()
    }

    /// Swap in a freshly fetched catalog.
    pub fn replace_all(&self, records: Vec<ListingRecord>) {
        let count = records.len();
        self.tx.send_modify(|snapshot| {
            snapshot.listings = Arc::from(records);
            snapshot.generation = snapshot.generation.saturating_add(1);
            snapshot.last_change = CatalogChange::Replaced { count };
        });
        tracing::debug!(count, "Catalog replaced");
    }

    /// Set the like flag of one listing and publish.
    ///
    /// The generation moves even when the listing is not in the catalog, so
    /// views that derive likes from elsewhere still refresh. Returns whether
    /// a record was updated.
    pub(crate) fn set_liked_flag(&self, id: &ListingId, liked: bool) -> bool {
        let mut found = false;
        self.tx.send_modify(|snapshot| {
            if let Some(index) = snapshot.listings.iter().position(|l| &l.id == id) {
                let mut listings = snapshot.listings.to_vec();
                if let Some(record) = listings.get_mut(index) {
                    record.liked_by_current_user = liked;
                }
                snapshot.listings = Arc::from(listings);
                found = true;
            }
            snapshot.generation = snapshot.generation.saturating_add(1);
            snapshot.last_change = CatalogChange::LikeChanged { listing_id: id.clone(), liked };
        });
        if !found {
            tracing::debug!(listing_id = %id, "Like flag changed for listing outside the catalog");
        }
        found
    }
}

/// Read handle on the shared catalog.
#[derive(Debug, Clone)]
pub struct CatalogSubscription {
    rx: watch::Receiver<CatalogSnapshot>,
}

impl CatalogSubscription {
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn refresh_generation(&self) -> u64 {
        self.rx.borrow().generation
    }

    #[must_use]
    pub fn liked_listings(&self) -> Vec<ListingRecord> {
        self.rx.borrow().liked_listings()
    }

    /// Wait for the next published change. Returns `false` once the
    /// publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Snapshot and mark it seen, so the next `changed` waits for a newer one.
    pub fn snapshot_and_mark_seen(&mut self) -> CatalogSnapshot {
        self.rx.borrow_and_update().clone()
    }
}
