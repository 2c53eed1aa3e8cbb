//! In-memory validation store for sync tests.

use crate::sync::{
    domain::{ContactId, ContactRef},
    ports::{StoreError, StoreResult, ValidationStore},
};
use crate::validation::domain::ValidationReport;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory store keyed by contact identifier.
///
/// Writes for selected contacts can be made to fail, which lets tests observe
/// the other target succeeding independently.
#[derive(Debug, Clone, Default)]
pub struct InMemoryValidationStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    rows: HashMap<ContactId, StoredValidation>,
    failing: HashSet<ContactId>,
    writes: usize,
}

#[derive(Debug, Clone)]
struct StoredValidation {
    contact: ContactRef,
    report: ValidationReport,
}

impl InMemoryValidationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes writes for `contact_id` fail with a persistence error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when lock acquisition fails.
    pub fn fail_for(&self, contact_id: ContactId) -> StoreResult<()> {
        self.write_state()?.failing.insert(contact_id);
        Ok(())
    }

    /// Returns the stored report for `contact_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when lock acquisition fails.
    pub fn report_for(&self, contact_id: &ContactId) -> StoreResult<Option<ValidationReport>> {
        let state = self.read_state()?;
        Ok(state.rows.get(contact_id).map(|row| row.report.clone()))
    }

    /// Returns the stored contact profile for `contact_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when lock acquisition fails.
    pub fn contact_for(&self, contact_id: &ContactId) -> StoreResult<Option<ContactRef>> {
        let state = self.read_state()?;
        Ok(state.rows.get(contact_id).map(|row| row.contact.clone()))
    }

    /// Returns the number of stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when lock acquisition fails.
    pub fn row_count(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.rows.len())
    }

    /// Returns the number of successful writes, counting overwrites.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when lock acquisition fails.
    pub fn write_count(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.writes)
    }

    fn read_state(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl ValidationStore for InMemoryValidationStore {
    async fn upsert(&self, contact: &ContactRef, report: &ValidationReport) -> StoreResult<()> {
        let mut state = self.write_state()?;
        if state.failing.contains(contact.contact_id()) {
            return Err(StoreError::persistence(std::io::Error::other(format!(
                "write rejected for contact {}",
                contact.contact_id()
            ))));
        }
        state.rows.insert(
            contact.contact_id().clone(),
            StoredValidation {
                contact: contact.clone(),
                report: report.clone(),
            },
        );
        state.writes += 1;
        Ok(())
    }
}
