//! Error types for validation domain parsing.

use thiserror::Error;

/// Errors returned while constructing validation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationDomainError {
    /// The input is not of the form `local@domain`.
    #[error("malformed email address '{0}', expected local@domain")]
    MalformedEmail(String),
}
