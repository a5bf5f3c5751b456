//! The profile entity synchronized between client and server.

use chrono::{DateTime, Utc};

use crate::ids::ProfileId;

/// A user profile as the server reports it.
///
/// The record is immutable by convention: the client never mutates fields
/// in place, it replaces the whole value with whatever the server returns
/// from a fetch or update. Timestamps are opaque ordering tokens supplied
/// by the server and are never interpreted client-side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Profile {
    /// Unique profile identifier
    pub id: ProfileId,
    /// Given name shown in UI
    pub first_name: String,
    /// Family name shown in UI
    pub last_name: String,
    /// Contact email address
    pub email: String,
    /// Optional free-form biography
    pub bio: Option<String>,
    /// Optional URL to the profile's avatar image
    #[cfg_attr(feature = "serde", serde(rename = "avatar"))]
    pub avatar_url: Option<String>,
    /// Access role assigned by the server
    pub role: ProfileRole,
    /// Timestamp of record creation
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last server-side update
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Full display name, `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Profile role enumeration
///
/// Closed set of roles the server may assign to a profile. The client
/// only displays the role; it never grants or checks permissions itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProfileRole {
    /// Administrator with full system access
    Admin,

    /// Regular registered user
    #[default]
    User,

    /// Unregistered or limited-access visitor
    Guest,
}

impl ProfileRole {
    /// Get all available roles
    pub fn all() -> &'static [ProfileRole] {
        &[ProfileRole::Admin, ProfileRole::User, ProfileRole::Guest]
    }

    /// Get the role name as the server spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRole::Admin => "admin",
            ProfileRole::User => "user",
            ProfileRole::Guest => "guest",
        }
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRole::Admin => write!(f, "Administrator"),
            ProfileRole::User => write!(f, "User"),
            ProfileRole::Guest => write!(f, "Guest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_spelling_matches_wire_format() {
        assert_eq!(ProfileRole::Admin.as_str(), "admin");
        assert_eq!(ProfileRole::User.as_str(), "user");
        assert_eq!(ProfileRole::Guest.as_str(), "guest");
    }

    #[test]
    fn all_roles_are_enumerated() {
        assert_eq!(ProfileRole::all().len(), 3);
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let profile = Profile {
            id: ProfileId::new("u1"),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            bio: None,
            avatar_url: None,
            role: ProfileRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(profile.full_name(), "John Doe");
    }
}
