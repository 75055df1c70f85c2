use std::path::Path;

use anyhow::Result;
use serde_json::json;

use super::{Target, load_catalog, open_session, print_json};

pub(crate) async fn run_queue(target: &Target, catalog: &Path) -> Result<()> {
    let session = open_session(target).await?;
    load_catalog(&session, catalog)?;

    let cards: Vec<_> = session
        .candidate_queue()
        .into_iter()
        .map(|record| {
            let image = session.card_image(&record);
            json!({ "listing": record, "image": image })
        })
        .collect();
    print_json(&json!(cards))
}

/// Print the liked listings of the catalog file.
///
/// A catalog file is a static export: its `likedByCurrentUser` flags predate
/// judgments made in earlier runs. The flags are reconciled with the rebuilt
/// interaction set and republished before reading the liked view.
pub(crate) async fn run_liked(target: &Target, catalog: &Path) -> Result<()> {
    let session = open_session(target).await?;
    load_catalog(&session, catalog)?;

    let interactions = session.interactions();
    let subscription = session.subscribe_catalog();
    let reconciled: Vec<_> = subscription
        .snapshot()
        .listings
        .iter()
        .cloned()
        .map(|record| {
            let liked = (record.liked_by_current_user || interactions.is_liked(&record.id))
                && !interactions.is_disliked(&record.id);
            record.liked(liked)
        })
        .collect();
    session.replace_catalog(reconciled);

    print_json(&json!(subscription.liked_listings()))
}

pub(crate) async fn run_dislikes(target: &Target) -> Result<()> {
    let session = open_session(target).await?;
    let disliked: Vec<_> = session.interactions().disliked().iter().cloned().collect();
    print_json(&json!(disliked))
}
