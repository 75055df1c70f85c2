use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use rentswipe_core::{ListingId, UserId};
use tokio::sync::RwLock;

use crate::authority::LikeAuthority;
use crate::error::RemoteError;

/// Like authority kept in process memory, for offline runs.
#[derive(Debug, Default)]
pub struct MemoryLikeAuthority {
    likes: RwLock<HashMap<UserId, BTreeSet<ListingId>>>,
}

impl MemoryLikeAuthority {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the likes of one user.
    #[must_use]
    pub fn with_likes(self, user: UserId, listings: impl IntoIterator<Item = ListingId>) -> Self {
        let mut likes = self.likes.into_inner();
        likes.entry(user).or_default().extend(listings);
        Self { likes: RwLock::new(likes) }
    }

    pub async fn likes_of(&self, user: &UserId) -> BTreeSet<ListingId> {
        self.likes.read().await.get(user).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LikeAuthority for MemoryLikeAuthority {
    async fn add_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError> {
        self.likes.write().await.entry(user.clone()).or_default().insert(listing.clone());
        Ok(())
    }

    async fn remove_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError> {
        if let Some(set) = self.likes.write().await.get_mut(user) {
            set.remove(listing);
        }
        Ok(())
    }

    async fn liked_listings(&self, user: &UserId) -> Result<Vec<ListingId>, RemoteError> {
        Ok(self.likes_of(user).await.into_iter().collect())
    }
}
