//! Checker variants.
//!
//! The set of checkers is closed: one MX checker backed by a resolver port and
//! three pure membership tests against static tables. Every variant is
//! stateless apart from shared read-only handles, so one instance may serve
//! any number of concurrent checks.

pub mod lists;
mod mx;

pub use mx::{DEFAULT_MX_TIMEOUT, MxChecker};

use crate::validation::domain::{CheckResult, DomainName, Signal};
use lists::{BLACKLISTED_DOMAINS, DISPOSABLE_DOMAINS, FREE_PROVIDER_DOMAINS, contains};
use tracing::debug;

/// One independent signal test against a domain.
#[derive(Debug, Clone)]
pub enum Checker {
    /// DNS MX lookup.
    Mx(MxChecker),
    /// Membership in [`DISPOSABLE_DOMAINS`].
    Disposable,
    /// Membership in [`BLACKLISTED_DOMAINS`].
    Blacklist,
    /// Membership in [`FREE_PROVIDER_DOMAINS`].
    FreeProvider,
}

impl Checker {
    /// Returns the full checker set, one per signal.
    #[must_use]
    pub fn standard_set(mx: MxChecker) -> Vec<Self> {
        vec![Self::Mx(mx), Self::Disposable, Self::Blacklist, Self::FreeProvider]
    }

    /// Returns the signal this checker produces.
    #[must_use]
    pub const fn signal(&self) -> Signal {
        match self {
            Self::Mx(_) => Signal::MxValid,
            Self::Disposable => Signal::Disposable,
            Self::Blacklist => Signal::Blacklisted,
            Self::FreeProvider => Signal::FreeProvider,
        }
    }

    /// Tests `domain` and returns the result. Never fails.
    pub async fn check(&self, domain: &DomainName) -> CheckResult {
        let table = match self {
            Self::Mx(mx) => return mx.check(domain).await,
            Self::Disposable => DISPOSABLE_DOMAINS,
            Self::Blacklist => BLACKLISTED_DOMAINS,
            Self::FreeProvider => FREE_PROVIDER_DOMAINS,
        };
        let listed = contains(table, domain.as_str());
        debug!(domain = %domain, signal = %self.signal(), listed, "membership check");
        CheckResult::new(self.signal(), listed)
    }
}
