//! Client-side synchronization controller for a remote user profile.
//!
//! The crate centers on [`ProfileController`], a single-writer state
//! machine that keeps one displayed profile in lockstep with the server
//! across an unreliable, asynchronous boundary. Remote calls go through
//! the [`ProfileService`] trait; [`ProfileApi`] is the reqwest-backed
//! implementation speaking `GET /users/{id}` / `PATCH /users/{id}`.
//!
//! Presentation layers subscribe via [`ProfileController::subscribe`] and
//! receive an immutable [`Snapshot`] synchronously on subscribe and on
//! every state change thereafter. In-flight requests are never cancelled;
//! results arriving for a superseded identity or operation are discarded
//! at apply time using a generation counter.

pub mod api;
pub mod controller;
pub mod errors;
pub mod service;
pub mod state;

pub use api::{ApiConfig, ProfileApi};
pub use controller::ProfileController;
pub use errors::{FailureKind, ServiceError};
pub use service::ProfileService;
pub use state::{Snapshot, SnapshotStore, SyncState};
