//! Synchronization state machine and snapshot publication
//!
//! This module provides a type-safe state machine for the profile
//! lifecycle and the watch-channel store that publishes immutable
//! snapshots of it to subscribers.

use std::sync::Arc;

use persona_model::Profile;
use tokio::sync::watch;

/// Profile synchronization state machine
#[derive(Debug, Clone)]
pub enum SyncState {
    /// No identity bound yet
    Idle,

    /// Fetch in flight.
    ///
    /// `previous` carries the last-known-good profile while a manual
    /// refetch is outstanding so the presentation can keep rendering it;
    /// a fresh bind starts with nothing.
    Loading {
        /// Profile displayed while the fetch is outstanding, if any
        previous: Option<Profile>,
    },

    /// Profile present, not editing
    Ready {
        /// The last entity the server handed us
        profile: Profile,
    },

    /// Profile present with the edit overlay active
    Editing {
        /// The entity the overlay was opened on
        profile: Profile,
    },

    /// Update in flight while editing
    Submitting {
        /// The entity as it stood before the attempt
        profile: Profile,
    },

    /// Last operation errored
    Failed {
        /// Entity retained from before the failed attempt, if any
        profile: Option<Profile>,
        /// Human-readable description of the failure
        error: String,
    },
}

impl SyncState {
    /// The profile this state holds, if any.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SyncState::Idle => None,
            SyncState::Loading { previous } => previous.as_ref(),
            SyncState::Ready { profile }
            | SyncState::Editing { profile }
            | SyncState::Submitting { profile } => Some(profile),
            SyncState::Failed { profile, .. } => profile.as_ref(),
        }
    }

    /// Whether a remote operation is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            SyncState::Loading { .. } | SyncState::Submitting { .. }
        )
    }

    /// Whether the edit overlay is active.
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            SyncState::Editing { .. } | SyncState::Submitting { .. }
        )
    }

    /// The error of the last settled operation, if it failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            SyncState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Flatten the state into the published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.profile().cloned(),
            loading: self.is_loading(),
            error: self.error().map(str::to_string),
            editing: self.is_editing(),
        }
    }
}

impl Default for SyncState {
    fn default() -> Self {
        SyncState::Idle
    }
}

/// Immutable published view of the controller state at a point in time.
///
/// `error` and `loading` are never both set: a settled failure always
/// clears the in-flight flag before it is published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// The displayed entity, absent until a fetch succeeds
    pub profile: Option<Profile>,
    /// Whether a fetch or update is outstanding
    pub loading: bool,
    /// Human-readable failure from the last settled operation
    pub error: Option<String>,
    /// Whether the edit overlay is active
    pub editing: bool,
}

/// Thread-safe snapshot publication using a watch channel
/// This provides efficient read access without locks
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    sender: Arc<watch::Sender<Snapshot>>,
    receiver: watch::Receiver<Snapshot>,
}

impl SnapshotStore {
    /// Create a new store holding the empty snapshot.
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(Snapshot::default());
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get the current snapshot
    pub fn current(&self) -> Snapshot {
        self.receiver.borrow().clone()
    }

    /// Access the snapshot without cloning
    pub fn with_snapshot<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Snapshot) -> R,
    {
        f(&self.receiver.borrow())
    }

    /// Subscribe to snapshot changes.
    ///
    /// The current value is readable synchronously through the receiver's
    /// `borrow`; every subsequent `set` wakes `changed()`.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.receiver.clone()
    }

    /// Publish a new snapshot
    pub fn set(&self, snapshot: Snapshot) {
        // Ignore send errors (no receivers)
        let _ = self.sender.send(snapshot);
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
