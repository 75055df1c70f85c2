//! Test utilities and module declarations for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rentswipe_core::{ListingId, ListingRecord, UserId};
use rentswipe_remote::{LikeAuthority, MemoryLikeAuthority, RemoteError};
use rentswipe_storage::MemoryKvStore;
use tokio::sync::Semaphore;

use crate::SwipeSession;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn id(raw: &str) -> ListingId {
    ListingId::new(raw).unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

pub fn listing(raw: &str) -> ListingRecord {
    ListingRecord::new(id(raw), format!("https://cdn.example.com/{raw}.jpg"))
}

/// Like authority with switchable failures, a shared gate that holds calls
/// until the test releases them, and per-listing gates for ordering writes.
pub struct ScriptedAuthority {
    pub inner: MemoryLikeAuthority,
    pub fail_add: AtomicBool,
    pub fail_remove: AtomicBool,
    pub fail_list: AtomicBool,
    pub gate_writes: AtomicBool,
    pub gate_reads: AtomicBool,
    pub add_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
    gate: Semaphore,
    held: Mutex<HashMap<ListingId, Arc<Semaphore>>>,
}

impl Default for ScriptedAuthority {
    fn default() -> Self {
        Self {
            inner: MemoryLikeAuthority::new(),
            fail_add: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
            fail_list: AtomicBool::new(false),
            gate_writes: AtomicBool::new(false),
            gate_reads: AtomicBool::new(false),
            add_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            held: Mutex::new(HashMap::new()),
        }
    }
}

impl ScriptedAuthority {
    pub fn with_likes(listings: &[&str]) -> Self {
        Self {
            inner: MemoryLikeAuthority::new()
                .with_likes(user(), listings.iter().map(|raw| id(raw))),
            ..Self::default()
        }
    }

    /// Let `n` held calls through.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Hold writes on one listing until [`Self::release_listing`].
    #[expect(clippy::unwrap_used, reason = "test code")]
    pub fn hold(&self, raw: &str) {
        self.held.lock().unwrap().insert(id(raw), Arc::new(Semaphore::new(0)));
    }

    #[expect(clippy::unwrap_used, reason = "test code")]
    pub fn release_listing(&self, raw: &str) {
        if let Some(gate) = self.held.lock().unwrap().get(&id(raw)) {
            gate.add_permits(1);
        }
    }

    #[expect(clippy::unwrap_used, reason = "test code")]
    async fn pass_listing_gate(&self, listing: &ListingId) {
        let gate = self.held.lock().unwrap().get(listing).cloned();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }

    async fn pass_gate(&self, flag: &AtomicBool) {
        if flag.load(Ordering::SeqCst) {
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
        }
    }

    fn failure(op: &str) -> RemoteError {
        RemoteError::HttpStatus { code: 503, body: format!("injected {op} failure") }
    }
}

#[async_trait]
impl LikeAuthority for ScriptedAuthority {
    async fn add_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(&self.gate_writes).await;
        self.pass_listing_gate(listing).await;
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(Self::failure("add"));
        }
        self.inner.add_like(user, listing).await
    }

    async fn remove_like(&self, user: &UserId, listing: &ListingId) -> Result<(), RemoteError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(&self.gate_writes).await;
        self.pass_listing_gate(listing).await;
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(Self::failure("remove"));
        }
        self.inner.remove_like(user, listing).await
    }

    async fn liked_listings(&self, user: &UserId) -> Result<Vec<ListingId>, RemoteError> {
        self.pass_gate(&self.gate_reads).await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::failure("list"));
        }
        self.inner.liked_listings(user).await
    }
}

pub struct Harness {
    pub session: Arc<SwipeSession>,
    pub authority: Arc<ScriptedAuthority>,
    pub store: Arc<MemoryKvStore>,
}

pub fn harness(authority: ScriptedAuthority) -> Harness {
    harness_with_store(authority, Arc::new(MemoryKvStore::new()))
}

pub fn harness_with_store(authority: ScriptedAuthority, store: Arc<MemoryKvStore>) -> Harness {
    let authority = Arc::new(authority);
    let session = Arc::new(SwipeSession::new(
        user(),
        Arc::clone(&authority) as Arc<dyn LikeAuthority>,
        Arc::clone(&store) as Arc<dyn rentswipe_storage::KeyValueStore>,
    ));
    Harness { session, authority, store }
}

/// Started session over a three-listing catalog.
pub async fn started(authority: ScriptedAuthority) -> Harness {
    let h = harness(authority);
    h.session.replace_catalog(vec![listing("A"), listing("B"), listing("C")]);
    h.session.start().await;
    h
}

pub fn queue_ids(session: &SwipeSession) -> Vec<String> {
    session.candidate_queue().iter().map(|l| l.id.as_str().to_owned()).collect()
}

/// Yield until `cond` holds, so spawned tasks reach their first await.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

mod builder_tests;
