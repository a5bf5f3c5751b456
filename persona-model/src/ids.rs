//! Strongly typed identifiers.

/// Stable identity of a profile, used as the synchronization key.
///
/// The server owns the format; the client treats it as an opaque string
/// and only ever compares it for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProfileId(pub String);

impl ProfileId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        ProfileId(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        ProfileId(id.to_string())
    }
}

impl From<String> for ProfileId {
    fn from(id: String) -> Self {
        ProfileId(id)
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
