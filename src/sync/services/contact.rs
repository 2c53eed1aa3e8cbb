//! Single-contact validation entry points.

use super::{SyncCoordinator, SyncOutcome};
use crate::sync::{
    domain::{ContactDraft, ContactId, ContactRef, CrmProperties, WriteStatus},
    ports::{CrmClient, CrmError, StoreError, ValidationStore},
};
use crate::validation::{
    domain::{ValidationDomainError, ValidationReport, ValidationStatus},
    services::ValidationService,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by [`ContactSyncService`].
#[derive(Debug, Clone, Error)]
pub enum ContactSyncError {
    /// The email address could not be parsed.
    #[error(transparent)]
    Input(#[from] ValidationDomainError),

    /// The contact carries no email address to validate.
    #[error("contact {0} has no email address")]
    MissingEmail(ContactId),

    /// Validation produced an error verdict; nothing was written.
    #[error("email {} rejected: {}", .0.email(), .0.message())]
    Rejected(Box<ValidationReport>),

    /// The CRM write failed.
    #[error(transparent)]
    Crm(#[from] CrmError),
}

/// Result of creating or updating a contact.
#[derive(Debug, Clone)]
pub struct ContactUpsert {
    contact: ContactRef,
    report: ValidationReport,
    store_write: WriteStatus<StoreError>,
}

impl ContactUpsert {
    /// Returns the contact as stored by the CRM.
    #[must_use]
    pub const fn contact(&self) -> &ContactRef {
        &self.contact
    }

    /// Returns the validation report written with the contact.
    #[must_use]
    pub const fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Returns the follow-up store write status.
    ///
    /// A failed store write is a warning: the CRM record already exists.
    #[must_use]
    pub const fn store_write(&self) -> &WriteStatus<StoreError> {
        &self.store_write
    }
}

/// Validates individual contacts and propagates the verdict.
pub struct ContactSyncService<S, R, C>
where
    S: ValidationStore,
    R: CrmClient,
    C: Clock + Send + Sync,
{
    validation: ValidationService<C>,
    coordinator: SyncCoordinator<S, R>,
    store: Arc<S>,
    crm: Arc<R>,
}

impl<S, R, C> ContactSyncService<S, R, C>
where
    S: ValidationStore,
    R: CrmClient,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a service over the given validator and collaborators.
    #[must_use]
    pub fn new(validation: ValidationService<C>, store: Arc<S>, crm: Arc<R>) -> Self {
        Self {
            validation,
            coordinator: SyncCoordinator::new(Arc::clone(&store), Arc::clone(&crm)),
            store,
            crm,
        }
    }

    /// Validates `email` without writing anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`ContactSyncError::Input`] when the address is malformed.
    pub async fn validate(&self, email: &str) -> Result<ValidationReport, ContactSyncError> {
        Ok(self.validation.evaluate(email).await?)
    }

    /// Validates an existing contact and writes the verdict to both targets.
    ///
    /// Write failures are reported in the returned [`SyncOutcome`].
    ///
    /// # Errors
    ///
    /// Returns [`ContactSyncError::MissingEmail`] or
    /// [`ContactSyncError::Input`] before any write is attempted.
    pub async fn validate_and_sync(
        &self,
        contact: &ContactRef,
    ) -> Result<SyncOutcome, ContactSyncError> {
        let email = contact
            .email()
            .ok_or_else(|| ContactSyncError::MissingEmail(contact.contact_id().clone()))?;
        let report = self.validation.evaluate(email).await?;
        Ok(self.coordinator.sync(report, Some(contact)).await)
    }

    /// Validates `email` and creates or updates the matching CRM contact.
    ///
    /// The CRM write runs first; the store write follows for the contact the
    /// CRM returns and its failure is only recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ContactSyncError::Input`] for malformed input,
    /// [`ContactSyncError::Rejected`] when the verdict is an error, and
    /// [`ContactSyncError::Crm`] when the CRM write fails.
    pub async fn upsert_contact(
        &self,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<ContactUpsert, ContactSyncError> {
        let report = self.validation.evaluate(email).await?;
        if report.status() == ValidationStatus::Error {
            info!(email = %report.email(), message = report.message(), "contact rejected");
            return Err(ContactSyncError::Rejected(Box::new(report)));
        }

        let draft = ContactDraft {
            email: report.email().as_str().to_owned(),
            first_name: first_name.map(str::to_owned),
            last_name: last_name.map(str::to_owned),
        };
        let properties = CrmProperties::from_report(&report);
        let contact = self
            .crm
            .create_or_update_contact(&draft, &properties)
            .await?;

        let store_result = self.store.upsert(&contact, &report).await;
        if let Err(err) = &store_result {
            warn!(
                contact_id = %contact.contact_id(),
                error = %err,
                "CRM contact saved but store write failed"
            );
        }

        Ok(ContactUpsert {
            contact,
            report,
            store_write: WriteStatus::from_result(store_result),
        })
    }
}
