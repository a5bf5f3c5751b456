//! Remote service error types
//!
//! Failures reported by the profile server, using thiserror for proper
//! error trait implementations. The controller flattens these into the
//! human-readable message published on the snapshot.

use thiserror::Error;

/// A failed call against the remote profile service.
///
/// The three variants mirror the three shapes a failure can arrive in:
/// the server answered with an error status, the transport produced its
/// own message, or nothing usable survived.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Server answered with a non-success status.
    #[error("{status} {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase, e.g. `"Not Found"`
        reason: String,
    },

    /// Request failed before the server produced a status.
    #[error("{0}")]
    Message(String),

    /// Failure with no detail worth surfacing.
    #[error("request failed")]
    Opaque,
}

impl ServiceError {
    /// Coarse classification of the failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ServiceError::Status { status, .. } => match status {
                404 => FailureKind::NotFound,
                401 | 403 => FailureKind::Forbidden,
                400 | 409 | 422 => FailureKind::Validation,
                500 | 502 | 503 | 504 => FailureKind::Unavailable,
                _ => FailureKind::Network,
            },
            ServiceError::Message(_) | ServiceError::Opaque => {
                FailureKind::Network
            }
        }
    }
}

/// Broad category of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The requested profile does not exist
    NotFound,
    /// The server exists but cannot serve the request right now
    Unavailable,
    /// The caller is not allowed to perform the operation
    Forbidden,
    /// The submitted data was rejected
    Validation,
    /// Transport-level failure or anything unclassified
    Network,
}

/// Which remote operation a failure belongs to, for message derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Fetch,
    Update,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Update => "update",
        }
    }
}

/// Derive the message published on the snapshot for a failed operation.
///
/// A status with a reason phrase yields `"Failed to {op} user: {reason}"`;
/// a bare message is surfaced verbatim; anything else falls back to
/// `"Failed to {op} user"`.
pub(crate) fn failure_message(
    operation: Operation,
    error: &ServiceError,
) -> String {
    match error {
        ServiceError::Status { reason, .. } if !reason.is_empty() => {
            format!("Failed to {} user: {}", operation.as_str(), reason)
        }
        ServiceError::Message(message) if !message.is_empty() => {
            message.clone()
        }
        _ => format!("Failed to {} user", operation.as_str()),
    }
}
