//! Resolver port for mail exchanger lookups.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for MX lookups.
pub type MxLookupResult<T> = Result<T, MxLookupError>;

/// DNS contract used by the MX checker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// Returns the exchanger host names published for `domain`.
    ///
    /// An empty list and [`MxLookupError::NoRecords`] are both read as "no
    /// mail exchanger" by the checker.
    ///
    /// # Errors
    ///
    /// Returns [`MxLookupError`] when the lookup fails or times out.
    async fn lookup_mx(&self, domain: &str) -> MxLookupResult<Vec<String>>;
}

/// Errors returned by resolver adapters.
#[derive(Debug, Clone, Error)]
pub enum MxLookupError {
    /// The domain exists but publishes no MX records, or does not exist.
    #[error("no MX records for {0}")]
    NoRecords(String),

    /// The resolver gave up waiting for an answer.
    #[error("MX lookup for {0} timed out")]
    Timeout(String),

    /// Any other resolver failure.
    #[error("resolver error: {0}")]
    Resolution(Arc<dyn std::error::Error + Send + Sync>),
}

impl MxLookupError {
    /// Wraps a resolver library error.
    pub fn resolution(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Resolution(Arc::new(err))
    }
}
