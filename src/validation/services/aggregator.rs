//! Fan-out aggregator producing one report per address.

use crate::validation::{
    checkers::{Checker, MxChecker},
    domain::{CheckResult, EmailAddress, SignalSet, ValidationDomainError, ValidationReport},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info};

/// Validation aggregator.
///
/// Runs every checker concurrently against the address's domain, waits for
/// all of them, and derives a single [`ValidationReport`].
pub struct ValidationService<C>
where
    C: Clock + Send + Sync,
{
    checkers: Arc<[Checker]>,
    clock: Arc<C>,
}

impl<C> Clone for ValidationService<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            checkers: Arc::clone(&self.checkers),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> ValidationService<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a service running the standard checker set.
    #[must_use]
    pub fn new(mx: MxChecker, clock: Arc<C>) -> Self {
        Self {
            checkers: Checker::standard_set(mx).into(),
            clock,
        }
    }

    /// Returns the configured checkers.
    #[must_use]
    pub fn checkers(&self) -> &[Checker] {
        &self.checkers
    }

    /// Parses `email` and evaluates it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationDomainError::MalformedEmail`] before any checker
    /// runs when the input is not of the form `local@domain`.
    pub async fn evaluate(&self, email: &str) -> Result<ValidationReport, ValidationDomainError> {
        let address = EmailAddress::parse(email)?;
        Ok(self.evaluate_address(address).await)
    }

    /// Evaluates an already parsed address.
    ///
    /// Checker failures surface as negative signals, so this never fails.
    pub async fn evaluate_address(&self, address: EmailAddress) -> ValidationReport {
        let results = self.run_checkers(&address).await;
        let report =
            ValidationReport::new(address, SignalSet::from_results(&results), &*self.clock);
        info!(
            email = %report.email(),
            status = %report.status(),
            message = report.message(),
            "validation finished"
        );
        report
    }

    async fn run_checkers(&self, address: &EmailAddress) -> Vec<CheckResult> {
        let pending: Vec<_> = self
            .checkers
            .iter()
            .map(|checker| {
                let task_checker = checker.clone();
                let domain = address.domain().clone();
                let handle = tokio::spawn(async move { task_checker.check(&domain).await });
                (checker.signal(), handle)
            })
            .collect();

        let mut results = Vec::with_capacity(pending.len());
        for (signal, handle) in pending {
            match handle.await {
                Ok(result) => results.push(result),
                Err(join_err) => {
                    error!(%signal, error = %join_err, "checker task aborted");
                    results.push(
                        CheckResult::new(signal, false)
                            .with_detail(format!("checker task aborted: {join_err}")),
                    );
                }
            }
        }
        results
    }
}
