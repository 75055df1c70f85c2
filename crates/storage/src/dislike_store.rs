//! Device-local record of rejected listings.
//!
//! Every operation fails soft: read and decode errors load as an empty set,
//! write errors are logged and swallowed. In-memory judgment state stays
//! authoritative for the running session either way.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rentswipe_core::ListingId;
use rentswipe_core::constants::DISLIKED_LISTINGS_KEY;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::traits::KeyValueStore;

#[derive(Debug, Serialize, Deserialize)]
struct DislikeEnvelope {
    version: u64,
    saved_at: DateTime<Utc>,
    ids: Vec<String>,
}

/// Older clients wrote a bare JSON array of ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDislikes {
    Envelope(DislikeEnvelope),
    Legacy(Vec<String>),
}

pub struct DislikeStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    version: AtomicU64,
}

impl std::fmt::Debug for DislikeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DislikeStore")
            .field("key", &self.key)
            .field("version", &self.version.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl DislikeStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DISLIKED_LISTINGS_KEY)
    }

    #[must_use]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into(), version: AtomicU64::new(0) }
    }

    /// Sequence stamp of the last value loaded or saved.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Read the persisted set. Never fails; problems load as empty.
    pub async fn load(&self) -> BTreeSet<ListingId> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeSet::new(),
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to read disliked listings, treating as empty"
                );
                return BTreeSet::new();
            },
        };
        match decode(&raw) {
            Ok((version, ids)) => {
                self.version.fetch_max(version, Ordering::AcqRel);
                tracing::debug!(count = ids.len(), version, "Loaded disliked listings");
                ids
            },
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Stored disliked listings are corrupt, treating as empty"
                );
                BTreeSet::new()
            },
        }
    }

    /// Overwrite the persisted set wholesale. Failures are logged only.
    pub async fn save(&self, ids: &BTreeSet<ListingId>) {
        let version = self.version.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        let envelope = DislikeEnvelope {
            version,
            saved_at: Utc::now(),
            ids: ids.iter().map(|id| id.as_str().to_owned()).collect(),
        };
        let encoded = match serde_json::to_string(&envelope) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode disliked listings, not persisted");
                return;
            },
        };
        if let Err(e) = self.store.set(&self.key, &encoded).await {
            tracing::warn!(
                key = %self.key,
                count = ids.len(),
                error = %e,
                "Failed to persist disliked listings, rejections survive only until restart"
            );
        }
    }

    /// Remove the persisted value entirely. Failures are logged only.
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key).await {
            tracing::warn!(key = %self.key, error = %e, "Failed to clear disliked listings");
        }
    }
}

fn decode(raw: &str) -> Result<(u64, BTreeSet<ListingId>), StorageError> {
    let (version, raw_ids) = match serde_json::from_str::<StoredDislikes>(raw)? {
        StoredDislikes::Envelope(envelope) => (envelope.version, envelope.ids),
        StoredDislikes::Legacy(ids) => (0, ids),
    };
    let ids = raw_ids
        .into_iter()
        .filter_map(|raw| match ListingId::new(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid stored listing id");
                None
            },
        })
        .collect();
    Ok((version, ids))
}
