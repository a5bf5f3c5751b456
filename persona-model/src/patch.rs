//! Partial patches of a profile's editable fields.

/// A finished edit draft, submitted against a bound profile.
///
/// Only the fields a user may edit appear here; the server computes
/// everything else (`role`, timestamps) and returns the full authoritative
/// record. Absent fields are left untouched server-side, so serialization
/// skips them entirely.
///
/// The draft itself is owned by the presentation layer while an edit
/// overlay is open; the controller only ever sees the finished patch.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProfilePatch {
    /// New given name, if edited
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub first_name: Option<String>,
    /// New family name, if edited
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub last_name: Option<String>,
    /// New biography, if edited
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub bio: Option<String>,
    /// New avatar URL, if edited
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            rename = "avatar",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub avatar_url: Option<String>,
}

impl ProfilePatch {
    /// Whether the patch touches no fields at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
    }
}
