//! Error types for sync domain values.

use thiserror::Error;

/// Errors returned while constructing sync domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// The contact identifier is empty after trimming.
    #[error("contact identifier must not be empty")]
    EmptyContactId,
}
