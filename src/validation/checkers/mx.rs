//! Mail exchanger checker.

use super::lists::{NON_ROUTABLE_TLDS, TEST_DOMAINS, contains};
use crate::validation::{
    domain::{CheckResult, DomainName, Signal},
    ports::{MxLookupError, MxResolver},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default upper bound for a single MX lookup.
pub const DEFAULT_MX_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks that a domain publishes at least one mail exchanger.
///
/// Resolver failures and timeouts are folded into a negative result with a
/// detail message; this checker never returns an error.
#[derive(Clone)]
pub struct MxChecker {
    resolver: Arc<dyn MxResolver>,
    timeout: Duration,
}

impl MxChecker {
    /// Creates a checker with [`DEFAULT_MX_TIMEOUT`].
    #[must_use]
    pub fn new(resolver: Arc<dyn MxResolver>) -> Self {
        Self::with_timeout(resolver, DEFAULT_MX_TIMEOUT)
    }

    /// Creates a checker with an explicit per-lookup timeout.
    #[must_use]
    pub fn with_timeout(resolver: Arc<dyn MxResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Returns the per-lookup timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the MX check for `domain`.
    pub async fn check(&self, domain: &DomainName) -> CheckResult {
        if let Some(reason) = non_deliverable_reason(domain) {
            warn!(domain = %domain, reason, "skipping MX lookup");
            return CheckResult::new(Signal::MxValid, false).with_detail(reason);
        }

        let host = lookup_host(domain.as_str());
        debug!(domain = %domain, host, "looking up MX records");
        let lookup = tokio::time::timeout(self.timeout, self.resolver.lookup_mx(host)).await;
        match lookup {
            Ok(Ok(exchangers)) if !exchangers.is_empty() => {
                debug!(domain = %domain, ?exchangers, "found MX records");
                CheckResult::new(Signal::MxValid, true).with_detail(exchangers.join(","))
            }
            Ok(Ok(_)) => negative(domain, &MxLookupError::NoRecords(host.to_owned())),
            Ok(Err(err)) => negative(domain, &err),
            Err(_) => negative(domain, &MxLookupError::Timeout(host.to_owned())),
        }
    }
}

impl std::fmt::Debug for MxChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MxChecker")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn negative(domain: &DomainName, err: &MxLookupError) -> CheckResult {
    warn!(domain = %domain, error = %err, "MX check failed");
    CheckResult::new(Signal::MxValid, false).with_detail(err.to_string())
}

fn non_deliverable_reason(domain: &DomainName) -> Option<&'static str> {
    if contains(TEST_DOMAINS, domain.as_str()) {
        return Some("reserved test domain");
    }
    match domain.top_level_label() {
        None => Some("domain has no top-level label"),
        Some(tld) if contains(NON_ROUTABLE_TLDS, tld) => {
            Some("top-level label does not route mail")
        }
        Some(_) => None,
    }
}

/// Strips URL scheme and `www.` prefixes users sometimes paste in.
fn lookup_host(domain: &str) -> &str {
    let without_scheme = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);
    without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme)
}
