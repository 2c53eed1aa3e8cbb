//! Shared world state for bulk sync BDD scenarios.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mailvet::sync::{
    adapters::memory::{InMemoryCrmClient, InMemoryValidationStore},
    domain::{ContactId, ContactRef},
    ports::CrmError,
    services::{BulkDispatcher, BulkSummary},
};
use mailvet::validation::{
    adapters::StaticMxResolver, checkers::MxChecker, services::ValidationService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Dispatcher type used by the BDD world.
pub type TestDispatcher = BulkDispatcher<InMemoryValidationStore, InMemoryCrmClient, DefaultClock>;

/// Scenario world for bulk sync behaviour tests.
pub struct BulkWorld {
    /// Store shared with the dispatcher.
    pub store: Arc<InMemoryValidationStore>,
    /// Contacts the CRM will hold when the run starts.
    pub pending_contacts: Vec<ContactRef>,
    /// Error the CRM returns for contact listing, if any.
    pub fetch_failure: Option<CrmError>,
    /// CRM used by the last run.
    pub crm: Option<Arc<InMemoryCrmClient>>,
    /// Summary of the last drained run.
    pub summary: Option<BulkSummary>,
    /// Error returned by the last run.
    pub run_error: Option<CrmError>,
}

impl BulkWorld {
    /// Creates a world with an empty store and CRM.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryValidationStore::new()),
            pending_contacts: Vec::new(),
            fetch_failure: None,
            crm: None,
            summary: None,
            run_error: None,
        }
    }

    /// Builds the CRM and dispatcher for a run.
    pub fn dispatcher(&mut self) -> Result<TestDispatcher, eyre::Report> {
        let crm = Arc::new(InMemoryCrmClient::with_contacts(
            self.pending_contacts.iter().cloned(),
        ));
        if let Some(error) = self.fetch_failure.clone() {
            crm.fail_fetch(error)
                .map_err(|err| eyre::eyre!("CRM setup failed: {err}"))?;
        }
        self.crm = Some(Arc::clone(&crm));

        let resolver = StaticMxResolver::with_domains(["acme.io", "globex.com", "initech.com"]);
        let validation = ValidationService::new(
            MxChecker::new(Arc::new(resolver)),
            Arc::new(DefaultClock),
        );
        let concurrency =
            NonZeroUsize::new(2).ok_or_else(|| eyre::eyre!("concurrency must be non-zero"))?;
        Ok(BulkDispatcher::new(
            validation,
            Arc::clone(&self.store),
            crm,
            concurrency,
        ))
    }

    /// Returns the summary of the last drained run.
    pub fn summary(&self) -> Result<BulkSummary, eyre::Report> {
        self.summary
            .ok_or_else(|| eyre::eyre!("no bulk run has completed in scenario world"))
    }
}

impl Default for BulkWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BulkWorld {
    BulkWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a contact identifier from step text.
pub fn parse_id(raw: &str) -> Result<ContactId, eyre::Report> {
    ContactId::new(raw).map_err(|err| eyre::eyre!("invalid contact id '{raw}': {err}"))
}
