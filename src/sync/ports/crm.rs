//! CRM port for contact reads and validation property writes.

use crate::sync::domain::{ContactDraft, ContactId, ContactRef, CrmProperties};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for CRM operations.
pub type CrmResult<T> = Result<T, CrmError>;

/// Remote CRM contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Creates the custom contact properties validation writes into.
    ///
    /// Properties that already exist are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when a property cannot be provisioned.
    async fn ensure_validation_properties(&self) -> CrmResult<()>;

    /// Returns every contact, following the CRM's paging until exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when any page fails.
    async fn fetch_all_contacts(&self) -> CrmResult<Vec<ContactRef>>;

    /// Overwrites the validation properties of an existing contact.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`]; [`CrmErrorKind::NotFound`] when the contact does
    /// not exist.
    async fn upsert_properties(
        &self,
        contact_id: &ContactId,
        properties: &CrmProperties,
    ) -> CrmResult<()>;

    /// Creates the contact, or updates the one with the same email, and
    /// returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when the CRM rejects the write.
    async fn create_or_update_contact(
        &self,
        draft: &ContactDraft,
        properties: &CrmProperties,
    ) -> CrmResult<ContactRef>;
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrmErrorKind {
    /// The CRM asked us to slow down.
    RateLimited,
    /// The CRM could not serve the request (outage, auth, network).
    Unavailable,
    /// The addressed record does not exist.
    NotFound,
    /// Anything else (bad request, conflict, undecodable response).
    Other,
}

impl CrmErrorKind {
    /// Returns a stable lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::NotFound => "not_found",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for CrmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by CRM client implementations.
#[derive(Debug, Clone, Error)]
pub enum CrmError {
    /// HTTP 429.
    #[error("CRM rate limit exceeded: {message}")]
    RateLimited {
        /// Response detail.
        message: String,
    },

    /// HTTP 5xx, 401 or 403.
    #[error("CRM unavailable (status {status}): {message}")]
    Unavailable {
        /// HTTP status code.
        status: u16,
        /// Response detail.
        message: String,
    },

    /// HTTP 404.
    #[error("CRM record not found: {message}")]
    NotFound {
        /// Response detail.
        message: String,
    },

    /// Any other non-success status.
    #[error("CRM rejected request (status {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response detail.
        message: String,
    },

    /// The request never produced a response.
    #[error("CRM transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response could not be decoded.
    #[error("CRM response decode failed: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },
}

impl CrmError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> CrmErrorKind {
        match self {
            Self::RateLimited { .. } => CrmErrorKind::RateLimited,
            Self::Unavailable { .. } | Self::Transport(_) => CrmErrorKind::Unavailable,
            Self::NotFound { .. } => CrmErrorKind::NotFound,
            Self::Rejected { .. } | Self::Decode { .. } => CrmErrorKind::Other,
        }
    }
}
