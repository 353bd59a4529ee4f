//! Error types for the menu accessibility bridge.

use thiserror::Error;

use crate::protocol::ChildId;

/// Errors surfaced through the accessibility protocol.
///
/// Read-only queries prefer returning an empty result over raising, so that
/// assistive clients keep working while the window is in a degraded state
/// (mid-teardown, fallback unavailable). Mutating operations raise: silently
/// ignoring them would tell the client the action succeeded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A child identifier outside the menu's item range, used where
    /// delegation to the standard object is not legal.
    #[error("child identifier {0} is outside the menu's item range")]
    InvalidChild(ChildId),

    /// The standard accessible object could not be produced, typically
    /// because the window handle is invalid or already destroyed.
    #[error("standard accessible object unavailable: {0}")]
    Unavailable(String),

    /// A protocol operation the popup menu model never supports
    /// (selection, help topics, name/value writes).
    #[error("operation is not supported by the popup menu model")]
    Unsupported,
}

/// A specialized Result type for accessibility operations.
pub type AccessResult<T> = Result<T, AccessError>;
