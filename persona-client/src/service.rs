//! The remote profile service seam.

use async_trait::async_trait;
use persona_model::{Profile, ProfileId, ProfilePatch};

use crate::errors::ServiceError;

/// Remote source of truth for profiles.
///
/// The controller depends on this trait alone; [`crate::ProfileApi`] is
/// the production implementation and tests substitute scripted stubs.
/// Implementations own transport concerns entirely, including timeouts —
/// the controller only ever sees success or failure.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetch the authoritative profile for `id`.
    async fn fetch_profile(
        &self,
        id: &ProfileId,
    ) -> Result<Profile, ServiceError>;

    /// Apply `patch` to the profile `id`.
    ///
    /// Success returns the full authoritative record with server-computed
    /// fields included, never an echo of the patch.
    async fn patch_profile(
        &self,
        id: &ProfileId,
        patch: &ProfilePatch,
    ) -> Result<Profile, ServiceError>;
}
