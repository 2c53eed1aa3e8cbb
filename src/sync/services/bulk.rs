//! Bulk validation of every CRM contact.

use super::{SyncCoordinator, SyncOutcome};
use crate::sync::{
    domain::ContactRef,
    ports::{CrmClient, CrmResult, ValidationStore},
};
use crate::validation::services::ValidationService;
use mockable::Clock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// How one scheduled contact finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOutcome {
    Synced { store_ok: bool, crm_ok: bool },
    InputError,
    Cancelled,
}

/// Tally of a drained bulk run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    /// Contacts scheduled for validation.
    pub scheduled: usize,
    /// Contacts whose report reached both targets.
    pub synced: usize,
    /// Contacts whose store write failed.
    pub store_failures: usize,
    /// Contacts whose CRM write failed.
    pub crm_failures: usize,
    /// Contacts whose email could not be parsed.
    pub input_errors: usize,
    /// Work items that ended without finishing.
    pub aborted: usize,
}

impl BulkSummary {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Synced { store_ok, crm_ok } => {
                if store_ok && crm_ok {
                    self.synced += 1;
                }
                if !store_ok {
                    self.store_failures += 1;
                }
                if !crm_ok {
                    self.crm_failures += 1;
                }
            }
            ItemOutcome::InputError => self.input_errors += 1,
            ItemOutcome::Cancelled => self.aborted += 1,
        }
    }
}

/// Handle over the work scheduled by one bulk run.
///
/// Dropping the handle leaves the work running.
#[derive(Debug)]
pub struct BulkDispatch {
    handles: Vec<JoinHandle<ItemOutcome>>,
}

impl BulkDispatch {
    /// Returns the number of scheduled work items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every scheduled item and tallies the results.
    pub async fn wait(self) -> BulkSummary {
        let mut summary = BulkSummary {
            scheduled: self.handles.len(),
            ..BulkSummary::default()
        };
        for handle in self.handles {
            match handle.await {
                Ok(outcome) => summary.record(outcome),
                Err(join_err) => {
                    error!(error = %join_err, "bulk work item aborted");
                    summary.aborted += 1;
                }
            }
        }
        summary
    }
}

/// Schedules one validate-and-sync task per CRM contact.
///
/// At most `concurrency` items run at once; the rest queue on a semaphore.
/// Each item's failures are logged and never affect other items.
pub struct BulkDispatcher<S, R, C>
where
    S: ValidationStore,
    R: CrmClient,
    C: Clock + Send + Sync,
{
    validation: ValidationService<C>,
    coordinator: SyncCoordinator<S, R>,
    crm: Arc<R>,
    permits: Arc<Semaphore>,
}

impl<S, R, C> BulkDispatcher<S, R, C>
where
    S: ValidationStore + 'static,
    R: CrmClient + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a dispatcher with a concurrency ceiling.
    #[must_use]
    pub fn new(
        validation: ValidationService<C>,
        store: Arc<S>,
        crm: Arc<R>,
        concurrency: NonZeroUsize,
    ) -> Self {
        Self {
            validation,
            coordinator: SyncCoordinator::new(store, Arc::clone(&crm)),
            crm,
            permits: Arc::new(Semaphore::new(concurrency.get())),
        }
    }

    /// Fetches every contact and schedules its validation.
    ///
    /// Returns as soon as the work is scheduled.
    ///
    /// # Errors
    ///
    /// Returns the CRM error when the contact fetch fails; nothing is
    /// scheduled in that case.
    pub async fn dispatch_all(&self) -> CrmResult<BulkDispatch> {
        let contacts = self.crm.fetch_all_contacts().await.map_err(|err| {
            error!(kind = %err.kind(), error = %err, "contact fetch failed, bulk run aborted");
            err
        })?;
        Ok(self.dispatch(contacts))
    }

    /// Schedules validation for `contacts`.
    ///
    /// Contacts without an email are skipped and not counted.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn dispatch(&self, contacts: Vec<ContactRef>) -> BulkDispatch {
        let total = contacts.len();
        let handles: Vec<_> = contacts
            .into_iter()
            .filter(|contact| {
                let has_email = contact.email().is_some();
                if !has_email {
                    debug!(contact_id = %contact.contact_id(), "skipping contact without email");
                }
                has_email
            })
            .map(|contact| self.process(contact))
            .collect();
        info!(
            scheduled = handles.len(),
            skipped = total - handles.len(),
            "bulk validation scheduled"
        );
        BulkDispatch { handles }
    }

    fn process(&self, contact: ContactRef) -> JoinHandle<ItemOutcome> {
        tokio::spawn(run_item(
            self.validation.clone(),
            self.coordinator.clone(),
            Arc::clone(&self.permits),
            contact,
        ))
    }
}

async fn run_item<S, R, C>(
    validation: ValidationService<C>,
    coordinator: SyncCoordinator<S, R>,
    permits: Arc<Semaphore>,
    contact: ContactRef,
) -> ItemOutcome
where
    S: ValidationStore,
    R: CrmClient,
    C: Clock + Send + Sync + 'static,
{
    let Ok(_permit) = permits.acquire_owned().await else {
        warn!(contact_id = %contact.contact_id(), "bulk permits closed");
        return ItemOutcome::Cancelled;
    };
    let email = contact.email().unwrap_or_default();
    match validation.evaluate(email).await {
        Ok(report) => {
            let outcome = coordinator.sync(report, Some(&contact)).await;
            log_item(&contact, &outcome);
            ItemOutcome::Synced {
                store_ok: outcome.store_write().is_ok(),
                crm_ok: outcome.crm_write().is_ok(),
            }
        }
        Err(err) => {
            warn!(contact_id = %contact.contact_id(), error = %err, "invalid contact email");
            ItemOutcome::InputError
        }
    }
}

fn log_item(contact: &ContactRef, outcome: &SyncOutcome) {
    debug!(
        contact_id = %contact.contact_id(),
        status = %outcome.report().status(),
        store_ok = outcome.store_write().is_ok(),
        crm_ok = outcome.crm_write().is_ok(),
        "contact processed"
    );
}
