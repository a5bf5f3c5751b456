//! Core data model definitions shared across Persona crates.

pub mod ids;
pub mod patch;
pub mod profile;

pub use ids::ProfileId;
pub use patch::ProfilePatch;
pub use profile::{Profile, ProfileRole};
