//! Shared test fixtures and a scripted stand-in for the remote service.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use persona_client::{ProfileService, ServiceError, Snapshot};
use persona_model::{Profile, ProfileId, ProfilePatch, ProfileRole};
use tokio::sync::{oneshot, watch};

/// Fabricate a profile for the given identity.
pub fn make_profile(id: &str) -> Profile {
    Profile {
        id: ProfileId::new(id),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: format!("{id}@example.com"),
        bio: None,
        avatar_url: None,
        role: ProfileRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

type Reply = oneshot::Sender<Result<Profile, ServiceError>>;

#[derive(Default)]
struct ScriptedInner {
    pending_fetches: Mutex<HashMap<String, VecDeque<Reply>>>,
    pending_patches: Mutex<HashMap<String, VecDeque<Reply>>>,
    fetch_calls: AtomicUsize,
    patch_calls: AtomicUsize,
    last_patch: Mutex<Option<ProfilePatch>>,
}

/// A profile service the test script resolves by hand.
///
/// Each call parks on a oneshot channel until the test releases it, which
/// makes resolution *order* — the thing the controller's generation
/// tokens guard — fully deterministic.
#[derive(Clone, Default)]
pub struct ScriptedService {
    inner: Arc<ScriptedInner>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_calls(&self) -> usize {
        self.inner.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn patch_calls(&self) -> usize {
        self.inner.patch_calls.load(Ordering::SeqCst)
    }

    pub fn last_patch(&self) -> Option<ProfilePatch> {
        self.inner.last_patch.lock().clone()
    }

    /// Resolve the oldest outstanding fetch for `id`, waiting for the
    /// controller's task to register it first.
    pub async fn release_fetch(
        &self,
        id: &str,
        result: Result<Profile, ServiceError>,
    ) {
        Self::release(&self.inner.pending_fetches, id, result).await;
    }

    /// Resolve the oldest outstanding patch for `id`.
    pub async fn release_patch(
        &self,
        id: &str,
        result: Result<Profile, ServiceError>,
    ) {
        Self::release(&self.inner.pending_patches, id, result).await;
    }

    async fn release(
        pending: &Mutex<HashMap<String, VecDeque<Reply>>>,
        id: &str,
        result: Result<Profile, ServiceError>,
    ) {
        let mut result = Some(result);
        for _ in 0..200 {
            let reply = {
                let mut map = pending.lock();
                map.get_mut(id).and_then(VecDeque::pop_front)
            };
            if let Some(reply) = reply {
                let _ = reply.send(result.take().expect("result consumed"));
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("no outstanding call for {id} to release");
    }

    fn park(
        pending: &Mutex<HashMap<String, VecDeque<Reply>>>,
        id: &ProfileId,
    ) -> oneshot::Receiver<Result<Profile, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        pending
            .lock()
            .entry(id.as_str().to_string())
            .or_default()
            .push_back(tx);
        rx
    }
}

#[async_trait]
impl ProfileService for ScriptedService {
    async fn fetch_profile(
        &self,
        id: &ProfileId,
    ) -> Result<Profile, ServiceError> {
        self.inner.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let rx = Self::park(&self.inner.pending_fetches, id);
        rx.await.expect("scripted fetch dropped")
    }

    async fn patch_profile(
        &self,
        id: &ProfileId,
        patch: &ProfilePatch,
    ) -> Result<Profile, ServiceError> {
        self.inner.patch_calls.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_patch.lock() = Some(patch.clone());
        let rx = Self::park(&self.inner.pending_patches, id);
        rx.await.expect("scripted patch dropped")
    }
}

/// Wait until the published snapshot satisfies `predicate`.
pub async fn wait_for(
    rx: &mut watch::Receiver<Snapshot>,
    predicate: impl Fn(&Snapshot) -> bool,
) -> Snapshot {
    {
        let current = rx.borrow();
        if predicate(&current) {
            return current.clone();
        }
    }
    loop {
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("timed out waiting for a matching snapshot")
            .expect("snapshot store dropped");
        let current = rx.borrow();
        if predicate(&current) {
            return current.clone();
        }
    }
}

/// Give spawned controller tasks a chance to run to completion.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(25)).await;
}
