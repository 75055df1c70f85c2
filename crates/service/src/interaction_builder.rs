use std::sync::Arc;

use rentswipe_core::{InteractionSet, ListingId, UserId};
use rentswipe_remote::LikeAuthority;
use rentswipe_storage::DislikeStore;
use tokio::sync::Mutex;

/// Result of one rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionSnapshot {
    pub interactions: InteractionSet,
    /// Remotely liked but locally disliked; the dislike wins and the remote
    /// like still has to be removed.
    pub conflicts: Vec<ListingId>,
    /// The liked-list fetch failed and was treated as empty.
    pub remote_failed: bool,
}

/// Merges the remote likes and the durable dislikes into one interaction set.
pub struct InteractionSetBuilder {
    authority: Arc<dyn LikeAuthority>,
    dislikes: Arc<DislikeStore>,
    rebuild_lock: Mutex<()>,
}

impl InteractionSetBuilder {
    #[must_use]
    pub fn new(authority: Arc<dyn LikeAuthority>, dislikes: Arc<DislikeStore>) -> Self {
        Self { authority, dislikes, rebuild_lock: Mutex::new(()) }
    }

    /// Fetch both sources concurrently and merge them.
    ///
    /// A failed remote fetch counts as "no likes": the user may see listings
    /// they liked before, but the session keeps working. Concurrent calls are
    /// serialized.
    pub async fn rebuild(&self, user: &UserId) -> InteractionSnapshot {
        let _guard = self.rebuild_lock.lock().await;

        let (remote, disliked) =
            tokio::join!(self.authority.liked_listings(user), self.dislikes.load());

        let (liked, remote_failed) = match remote {
            Ok(ids) => (ids, false),
            Err(e) => {
                tracing::warn!(
                    user_id = %user,
                    error = %e,
                    "Failed to fetch liked listings, continuing without them"
                );
                (Vec::new(), true)
            },
        };

        let (conflicts, liked): (Vec<ListingId>, Vec<ListingId>) =
            liked.into_iter().partition(|id| disliked.contains(id));
        if !conflicts.is_empty() {
            tracing::info!(
                count = conflicts.len(),
                "Listings liked remotely but disliked locally, keeping the dislike"
            );
        }

        let interactions = InteractionSet::new(liked, disliked);
        tracing::debug!(
            liked = interactions.liked().len(),
            disliked = interactions.disliked().len(),
            "Interaction set rebuilt"
        );
        InteractionSnapshot { interactions, conflicts, remote_failed }
    }
}
