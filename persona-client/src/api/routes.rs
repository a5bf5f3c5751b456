//! Route definitions for the profile server.

/// Profile resource routes
pub mod users {
    /// Collection endpoint
    pub const COLLECTION: &str = "/users";
    /// Single-profile endpoint; `{id}` is the profile identifier
    pub const ITEM: &str = "/users/{id}";
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }
}
