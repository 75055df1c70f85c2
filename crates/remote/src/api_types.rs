//! Wire types for the like authority HTTP API.

use rentswipe_core::RawId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddLikeRequest<'a> {
    pub listing_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikedObject {
    #[serde(rename = "listingId", alias = "listing_id", alias = "id")]
    pub listing_id: RawId,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LikedEntry {
    Id(RawId),
    Object(LikedObject),
}

impl LikedEntry {
    pub(crate) fn into_raw(self) -> String {
        match self {
            Self::Id(id) => id.into_string(),
            Self::Object(obj) => obj.listing_id.into_string(),
        }
    }
}

/// `GET /users/{user}/likes` answers either a bare array or `{"likes": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LikedListingsBody {
    Bare(Vec<LikedEntry>),
    Wrapped { likes: Vec<LikedEntry> },
}

impl LikedListingsBody {
    pub(crate) fn into_entries(self) -> Vec<LikedEntry> {
        match self {
            Self::Bare(entries) | Self::Wrapped { likes: entries } => entries,
        }
    }
}
