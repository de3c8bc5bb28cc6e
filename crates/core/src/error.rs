//! Error types for the resolution layer.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`RelayError`] - Per-request resolution errors (ids, cursors, arguments)
//! - [`RegistryError`] - Start-up errors while building the type registry
//! - [`StoreError`] - Errors raised by fetchers and collection sources
//!
//! Store errors convert into [`RelayError`] via `From`, so `?` works
//! across the port boundary.

use thiserror::Error;

// =============================================================================
// Relay Errors
// =============================================================================

/// Errors reported for a single node lookup or connection request.
///
/// These are scoped to the field being resolved: a failure here never
/// aborts sibling lookups in the same request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Global id string could not be decoded.
    #[error("Malformed global id: {0}")]
    MalformedId(String),

    /// Decoded type name has no registration.
    #[error("Unknown node type: {0}")]
    UnknownType(String),

    /// Cursor string could not be decoded to an offset.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Pagination argument out of range (negative `first`/`last`).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Fetcher or collection source failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl RelayError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::MalformedId(_) => "MALFORMED_ID",
            RelayError::UnknownType(_) => "UNKNOWN_TYPE",
            RelayError::InvalidCursor(_) => "INVALID_CURSOR",
            RelayError::InvalidArgument(_) => "INVALID_ARGUMENT",
            RelayError::Store(_) => "STORE_ERROR",
        }
    }
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while populating a [`crate::registry::TypeRegistry`].
///
/// These are fatal at start-up; they never occur while serving requests.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A type with this name is already registered.
    #[error("Node type already registered: {0}")]
    DuplicateType(String),
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the backing store behind fetchers and collection sources.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The operation was cancelled before it completed.
    #[error("Store operation cancelled")]
    Cancelled,

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for resolution operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: une erreur de store remonte via ? en conservant le message
    #[test]
    fn test_store_error_converts_into_relay_error() {
        fn load() -> RelayResult<()> {
            Err(StoreError::Backend("disk on fire".into()))?;
            Ok(())
        }

        let err = load().unwrap_err();
        assert!(matches!(err, RelayError::Store(StoreError::Backend(_))));
        assert!(err.to_string().contains("disk on fire"));
        assert_eq!(err.code(), "STORE_ERROR");
    }

    // Test critique: chaque type d'erreur a un code distinct pour les clients
    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            RelayError::MalformedId("x".into()).code(),
            RelayError::UnknownType("x".into()).code(),
            RelayError::InvalidCursor("x".into()).code(),
            RelayError::InvalidArgument("x".into()).code(),
            RelayError::Store(StoreError::Cancelled).code(),
        ];
        let mut deduped = codes.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }
}
