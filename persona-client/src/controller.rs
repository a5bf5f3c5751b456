//! The profile synchronization controller.

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;
use persona_model::{Profile, ProfileId, ProfilePatch};
use tokio::sync::watch;

use crate::errors::{Operation, ServiceError, failure_message};
use crate::service::ProfileService;
use crate::state::{Snapshot, SnapshotStore, SyncState};

type SavedListener = Box<dyn Fn(&Profile) + Send + Sync>;

/// Synchronization controller for a single displayed profile
///
/// Owns the canonical state, the fetch/update lifecycle and the
/// arbitration of overlapping asynchronous operations. All transitions
/// are serialized through one mutex (single-writer); remote calls run on
/// spawned tokio tasks and re-enter through generation-checked apply
/// functions, so a result issued for a superseded identity or operation
/// can never mutate state.
///
/// Operations must be invoked from within a tokio runtime. The controller
/// is cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ProfileController {
    service: Arc<dyn ProfileService>,
    inner: Arc<Mutex<Inner>>,
    store: SnapshotStore,
    on_saved: Arc<Mutex<Option<SavedListener>>>,
}

struct Inner {
    /// Identity the controller is currently bound to
    bound: Option<ProfileId>,
    /// Monotonic counter stamped onto every issued operation
    generation: u64,
    state: SyncState,
}

impl ProfileController {
    /// Create a controller over the given remote service.
    pub fn new(service: Arc<dyn ProfileService>) -> Self {
        Self {
            service,
            inner: Arc::new(Mutex::new(Inner {
                bound: None,
                generation: 0,
                state: SyncState::Idle,
            })),
            store: SnapshotStore::new(),
            on_saved: Arc::new(Mutex::new(None)),
        }
    }

    /// Bind the controller to an identity and fetch it.
    ///
    /// Any in-flight operation is superseded: its result will be
    /// discarded on arrival, whichever order the responses land in.
    pub fn bind(&self, id: impl Into<ProfileId>) {
        let id = id.into();
        info!("Binding profile {id}");
        let generation = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.bound = Some(id.clone());
            inner.state = SyncState::Loading { previous: None };
            self.store.set(inner.state.snapshot());
            inner.generation
        };
        self.spawn_fetch(id, generation);
    }

    /// Re-issue the fetch for the currently bound identity.
    ///
    /// Works from any state; the last-known-good profile stays visible
    /// while the fetch is outstanding. Without a bound identity this is
    /// a no-op.
    pub fn refetch(&self) {
        let issued = {
            let mut inner = self.inner.lock();
            let Some(id) = inner.bound.clone() else {
                debug!("Refetch with no bound identity; ignoring");
                return;
            };
            inner.generation += 1;
            let previous = inner.state.profile().cloned();
            inner.state = SyncState::Loading { previous };
            self.store.set(inner.state.snapshot());
            (id, inner.generation)
        };
        info!("Refetching profile {}", issued.0);
        self.spawn_fetch(issued.0, issued.1);
    }

    /// Open the edit overlay on the current profile.
    ///
    /// Only meaningful from `Ready`; anywhere else it is a no-op.
    pub fn begin_edit(&self) {
        let mut inner = self.inner.lock();
        match &inner.state {
            SyncState::Ready { profile } => {
                let profile = profile.clone();
                inner.state = SyncState::Editing { profile };
                self.store.set(inner.state.snapshot());
            }
            state => {
                debug!("begin_edit outside Ready ({state:?}); ignoring");
            }
        }
    }

    /// Close the edit overlay, discarding nothing controller-side.
    ///
    /// The draft lives in the presentation layer; the controller merely
    /// returns to `Ready` with the profile it already held.
    pub fn cancel_edit(&self) {
        let mut inner = self.inner.lock();
        match &inner.state {
            SyncState::Editing { profile } => {
                let profile = profile.clone();
                inner.state = SyncState::Ready { profile };
                self.store.set(inner.state.snapshot());
            }
            state => {
                debug!("cancel_edit outside Editing ({state:?}); ignoring");
            }
        }
    }

    /// Submit a finished edit draft against the bound identity.
    ///
    /// A no-op when no profile is held (nothing to update) and when an
    /// update is already in flight (at most one per identity).
    pub fn submit_edit(&self, patch: ProfilePatch) {
        let issued = {
            let mut inner = self.inner.lock();
            match &inner.state {
                SyncState::Submitting { .. } => {
                    warn!("Profile update already in flight; ignoring submit");
                    return;
                }
                SyncState::Idle | SyncState::Loading { .. } => {
                    debug!("submit_edit without a settled profile; ignoring");
                    return;
                }
                _ => {}
            }
            let Some(profile) = inner.state.profile().cloned() else {
                debug!("submit_edit with no profile to update; ignoring");
                return;
            };
            let Some(id) = inner.bound.clone() else {
                debug!("submit_edit with no bound identity; ignoring");
                return;
            };
            inner.generation += 1;
            inner.state = SyncState::Submitting { profile };
            self.store.set(inner.state.snapshot());
            (id, inner.generation)
        };
        info!("Submitting profile update for {}", issued.0);
        let controller = self.clone();
        let (id, generation) = issued;
        tokio::spawn(async move {
            let result =
                controller.service.patch_profile(&id, &patch).await;
            controller.apply_update(generation, result);
        });
    }

    /// Clear a settled failure.
    ///
    /// Returns to `Ready` when a profile survived the failure, otherwise
    /// to the empty `Idle` state.
    pub fn dismiss_error(&self) {
        let mut inner = self.inner.lock();
        match &inner.state {
            SyncState::Failed {
                profile: Some(profile),
                ..
            } => {
                let profile = profile.clone();
                inner.state = SyncState::Ready { profile };
                self.store.set(inner.state.snapshot());
            }
            SyncState::Failed { profile: None, .. } => {
                inner.state = SyncState::Idle;
                self.store.set(inner.state.snapshot());
            }
            state => {
                debug!("dismiss_error outside Failed ({state:?}); ignoring");
            }
        }
    }

    /// Register a listener invoked exactly once per successful update,
    /// after the controller's own state has settled and the snapshot has
    /// been published.
    pub fn set_on_saved<F>(&self, listener: F)
    where
        F: Fn(&Profile) + Send + Sync + 'static,
    {
        *self.on_saved.lock() = Some(Box::new(listener));
    }

    /// The current published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.store.current()
    }

    /// Subscribe to snapshot changes.
    ///
    /// The current snapshot is readable synchronously through the
    /// receiver's `borrow`; every state change wakes `changed()`.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    fn spawn_fetch(&self, id: ProfileId, generation: u64) {
        let controller = self.clone();
        tokio::spawn(async move {
            let result = controller.service.fetch_profile(&id).await;
            controller.apply_fetch(generation, result);
        });
    }

    /// Apply a settled fetch, unless a newer operation superseded it.
    fn apply_fetch(
        &self,
        generation: u64,
        result: Result<Profile, ServiceError>,
    ) {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(
                "Discarding stale fetch result (generation {generation}, current {})",
                inner.generation
            );
            return;
        }
        inner.state = match result {
            Ok(profile) => {
                debug!("Fetch settled for {}", profile.id);
                SyncState::Ready { profile }
            }
            Err(error) => {
                warn!("Fetch failed: {error}");
                SyncState::Failed {
                    profile: None,
                    error: failure_message(Operation::Fetch, &error),
                }
            }
        };
        self.store.set(inner.state.snapshot());
    }

    /// Apply a settled update, unless a newer operation superseded it.
    fn apply_update(
        &self,
        generation: u64,
        result: Result<Profile, ServiceError>,
    ) {
        let saved = {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                debug!(
                    "Discarding stale update result (generation {generation}, current {})",
                    inner.generation
                );
                return;
            }
            match result {
                Ok(profile) => {
                    debug!("Update settled for {}", profile.id);
                    inner.state = SyncState::Ready {
                        profile: profile.clone(),
                    };
                    self.store.set(inner.state.snapshot());
                    Some(profile)
                }
                Err(error) => {
                    warn!("Update failed: {error}");
                    let retained = inner.state.profile().cloned();
                    inner.state = SyncState::Failed {
                        profile: retained,
                        error: failure_message(Operation::Update, &error),
                    };
                    self.store.set(inner.state.snapshot());
                    None
                }
            }
        };
        // Notify outside the state lock so listeners observe the settled
        // snapshot.
        if let Some(profile) = saved {
            let listener = self.on_saved.lock();
            if let Some(listener) = listener.as_ref() {
                listener(&profile);
            }
        }
    }
}

impl std::fmt::Debug for ProfileController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ProfileController")
            .field("bound", &inner.bound)
            .field("generation", &inner.generation)
            .field("state", &inner.state)
            .finish()
    }
}
