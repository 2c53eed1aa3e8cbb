//! Shared world state for email validation BDD scenarios.

use std::sync::Arc;

use mailvet::validation::{
    adapters::StaticMxResolver,
    checkers::MxChecker,
    domain::{ValidationDomainError, ValidationReport},
    services::ValidationService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for validation behaviour tests.
pub struct ValidationWorld {
    /// Resolver answering the MX lookups.
    pub resolver: StaticMxResolver,
    /// Result of the last evaluation.
    pub last_result: Option<Result<ValidationReport, ValidationDomainError>>,
}

impl ValidationWorld {
    /// Creates a world whose resolver knows no domains.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: StaticMxResolver::new(),
            last_result: None,
        }
    }

    /// Builds a service over the world's resolver.
    pub fn service(&self) -> ValidationService<DefaultClock> {
        ValidationService::new(
            MxChecker::new(Arc::new(self.resolver.clone())),
            Arc::new(DefaultClock),
        )
    }

    /// Returns the last successful report.
    pub fn report(&self) -> Result<&ValidationReport, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(report)) => Ok(report),
            Some(Err(err)) => Err(eyre::eyre!("validation failed unexpectedly: {err}")),
            None => Err(eyre::eyre!("no validation has run in scenario world")),
        }
    }
}

impl Default for ValidationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ValidationWorld {
    ValidationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
