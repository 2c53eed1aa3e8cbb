//! Store port for persisting validation reports.

use crate::sync::domain::ContactRef;
use crate::validation::domain::ValidationReport;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Relational store contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ValidationStore: Send + Sync {
    /// Creates or replaces the contact's profile and its latest report.
    ///
    /// Keyed by contact identifier: a later call for the same contact
    /// overwrites the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write is not applied.
    async fn upsert(&self, contact: &ContactRef, report: &ValidationReport) -> StoreResult<()>;
}

/// Errors returned by store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not hand out a connection.
    #[error("store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a connection acquisition error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
