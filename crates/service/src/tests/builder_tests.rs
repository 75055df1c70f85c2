#![expect(clippy::unwrap_used, reason = "test code")]

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use rentswipe_core::{JudgmentStatus, RemoteStage, Verdict};
use rentswipe_remote::LikeAuthority;
use rentswipe_storage::{DislikeStore, KeyValueStore, MemoryKvStore};

use super::{ScriptedAuthority, harness, harness_with_store, id, listing, queue_ids, user};
use crate::InteractionSetBuilder;

async fn seeded_store(ids: &[&str]) -> Arc<MemoryKvStore> {
    let store = Arc::new(MemoryKvStore::new());
    let dislikes = DislikeStore::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
    dislikes.save(&ids.iter().map(|raw| id(raw)).collect()).await;
    store
}

#[tokio::test]
async fn rebuild_merges_remote_likes_and_local_dislikes() {
    let store = seeded_store(&["B"]).await;
    let authority: Arc<dyn LikeAuthority> = Arc::new(ScriptedAuthority::with_likes(&["A", "C"]));
    let dislikes = Arc::new(DislikeStore::new(store as Arc<dyn KeyValueStore>));
    let builder = InteractionSetBuilder::new(authority, dislikes);

    let snapshot = builder.rebuild(&user()).await;

    assert!(!snapshot.remote_failed);
    assert!(snapshot.conflicts.is_empty());
    assert_eq!(snapshot.interactions.liked(), &BTreeSet::from([id("A"), id("C")]));
    assert_eq!(snapshot.interactions.disliked(), &BTreeSet::from([id("B")]));
    assert_eq!(snapshot.interactions.interacted().len(), 3);
}

#[tokio::test]
async fn failed_like_fetch_fails_open() {
    let authority = ScriptedAuthority::with_likes(&["A"]);
    authority.fail_list.store(true, Ordering::SeqCst);
    let h = harness_with_store(authority, seeded_store(&["B"]).await);
    h.session.replace_catalog(vec![listing("A"), listing("B"), listing("C")]);

    h.session.start().await;

    assert!(h.session.is_ready());
    assert!(h.session.interactions().liked().is_empty());
    assert_eq!(queue_ids(&h.session), vec!["A", "C"]);
}

#[tokio::test]
async fn remote_like_contradicting_local_dislike_is_reconciled() {
    let authority = ScriptedAuthority::with_likes(&["A", "B"]);
    let h = harness_with_store(authority, seeded_store(&["A"]).await);
    h.session.replace_catalog(vec![listing("A"), listing("B"), listing("C")]);

    h.session.start().await;

    let interactions = h.session.interactions();
    assert!(interactions.is_disliked(&id("A")));
    assert!(!interactions.is_liked(&id("A")));
    assert!(interactions.is_liked(&id("B")));

    let failed = h.session.failed_judgments();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].verdict, Verdict::Reject);
    assert_eq!(failed[0].failed_stage, Some(RemoteStage::RemoveLike));

    let summary = h.session.retry_failed().await.unwrap();

    assert_eq!(summary.confirmed, 1);
    assert_eq!(h.session.judgment(&id("A")).unwrap().status, JudgmentStatus::Confirmed);
    assert_eq!(h.authority.inner.likes_of(&user()).await, BTreeSet::from([id("B")]));
}

#[tokio::test]
async fn dislikes_survive_a_restart() {
    let store = Arc::new(MemoryKvStore::new());
    let first = harness_with_store(ScriptedAuthority::default(), Arc::clone(&store));
    first.session.replace_catalog(vec![listing("A"), listing("B")]);
    first.session.start().await;
    first.session.decide(&id("B"), Verdict::Reject).await;
    drop(first);

    let second = harness_with_store(ScriptedAuthority::default(), store);
    second.session.replace_catalog(vec![listing("A"), listing("B")]);
    second.session.start().await;

    assert_eq!(queue_ids(&second.session), vec!["A"]);
    assert!(second.session.interactions().is_disliked(&id("B")));
}

#[tokio::test]
async fn start_is_idempotent() {
    let h = harness(ScriptedAuthority::default());
    h.session.replace_catalog(vec![listing("A")]);
    h.session.start().await;
    h.session.decide(&id("A"), Verdict::Approve).await;

    h.session.start().await;

    assert!(h.session.interactions().is_liked(&id("A")));
    assert!(h.session.candidate_queue().is_empty());
}
