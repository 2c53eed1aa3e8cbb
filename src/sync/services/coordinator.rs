//! Dual-write propagation of validation reports.

use crate::sync::{
    domain::{ContactRef, CrmProperties, WriteStatus},
    ports::{CrmClient, CrmError, CrmErrorKind, StoreError, ValidationStore},
};
use crate::validation::domain::ValidationReport;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Result of propagating one report to the store and the CRM.
///
/// Transient: the coordinator does not persist it. The two statuses are
/// independent; neither write is rolled back when the other fails.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    report: ValidationReport,
    store_write: WriteStatus<StoreError>,
    crm_write: WriteStatus<CrmError>,
}

impl SyncOutcome {
    /// Outcome for a report with no contact to write to.
    #[must_use]
    pub const fn skipped(report: ValidationReport) -> Self {
        Self {
            report,
            store_write: WriteStatus::Skipped,
            crm_write: WriteStatus::Skipped,
        }
    }

    /// Returns the propagated report.
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Returns the store write status.
    #[must_use]
    pub const fn store_write(&self) -> &WriteStatus<StoreError> {
        &self.store_write
    }

    /// Returns the CRM write status.
    #[must_use]
    pub const fn crm_write(&self) -> &WriteStatus<CrmError> {
        &self.crm_write
    }

    /// Returns whether both writes were applied.
    #[must_use]
    pub const fn fully_synced(&self) -> bool {
        self.store_write.is_ok() && self.crm_write.is_ok()
    }

    /// Consumes the outcome, returning the report.
    #[must_use]
    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}

/// Propagates reports to the relational store and the CRM.
pub struct SyncCoordinator<S, R>
where
    S: ValidationStore,
    R: CrmClient,
{
    store: Arc<S>,
    crm: Arc<R>,
}

impl<S, R> Clone for SyncCoordinator<S, R>
where
    S: ValidationStore,
    R: CrmClient,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            crm: Arc::clone(&self.crm),
        }
    }
}

impl<S, R> SyncCoordinator<S, R>
where
    S: ValidationStore,
    R: CrmClient,
{
    /// Creates a coordinator over the given collaborators.
    #[must_use]
    pub const fn new(store: Arc<S>, crm: Arc<R>) -> Self {
        Self { store, crm }
    }

    /// Writes `report` to both targets for `contact`.
    ///
    /// Without a contact both writes are skipped. Otherwise the store upsert
    /// and the CRM property update run concurrently; failures are captured in
    /// the outcome and never returned as errors.
    pub async fn sync(
        &self,
        report: ValidationReport,
        contact: Option<&ContactRef>,
    ) -> SyncOutcome {
        let Some(contact) = contact else {
            debug!(email = %report.email(), "no contact linked, skipping sync");
            return SyncOutcome::skipped(report);
        };

        let properties = CrmProperties::from_report(&report);
        let (store_result, crm_result) = tokio::join!(
            self.store.upsert(contact, &report),
            self.crm.upsert_properties(contact.contact_id(), &properties),
        );

        if let Err(err) = &store_result {
            error!(contact_id = %contact.contact_id(), error = %err, "store write failed");
        }
        if let Err(err) = &crm_result {
            log_crm_failure(contact, err);
        }

        SyncOutcome {
            report,
            store_write: WriteStatus::from_result(store_result),
            crm_write: WriteStatus::from_result(crm_result),
        }
    }
}

fn log_crm_failure(contact: &ContactRef, err: &CrmError) {
    let contact_id = contact.contact_id();
    match err.kind() {
        CrmErrorKind::RateLimited => {
            warn!(%contact_id, kind = %err.kind(), error = %err, "CRM write rate limited");
        }
        CrmErrorKind::Unavailable | CrmErrorKind::NotFound | CrmErrorKind::Other => {
            error!(%contact_id, kind = %err.kind(), error = %err, "CRM write failed");
        }
    }
}
