use async_trait::async_trait;
use rentswipe_core::{ListingId, UserId};

use crate::error::RemoteError;

/// Server-held set of listings a user has approved.
#[async_trait]
pub trait LikeAuthority: Send + Sync {
    /// Record that `user` likes `listing`. Liking twice is not an error.
    async fn add_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError>;

    /// Drop the like. A like that is already absent counts as success.
    async fn remove_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError>;

    /// Every listing `user` currently likes, de-duplicated, server order.
    async fn liked_listings(&self, user: &UserId) -> Result<Vec<ListingId>, RemoteError>;
}
