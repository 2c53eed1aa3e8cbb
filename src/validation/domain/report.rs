//! Aggregated validation verdicts.

use super::{CheckResult, DomainName, EmailAddress, Signal};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Overall verdict for an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// No disqualifying or advisory signal was raised.
    Valid,
    /// Advisory only; contact creation may proceed.
    Warning,
    /// Disqualifying; callers should not proceed.
    Error,
}

impl ValidationStatus {
    /// Returns the canonical lower-case representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four boolean signals gathered for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SignalSet {
    /// At least one mail exchanger resolved.
    pub mx_valid: bool,
    /// Domain is a disposable provider.
    pub is_disposable: bool,
    /// Domain is denylisted.
    pub is_blacklisted: bool,
    /// Domain is a free consumer provider.
    pub is_free_provider: bool,
}

impl SignalSet {
    /// Folds checker results into a signal set.
    ///
    /// Signals without a result stay `false`, which for MX means the report
    /// ends up as an error.
    #[must_use]
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a CheckResult>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut set, result| {
                match result.signal() {
                    Signal::MxValid => set.mx_valid = result.value(),
                    Signal::Disposable => set.is_disposable = result.value(),
                    Signal::Blacklisted => set.is_blacklisted = result.value(),
                    Signal::FreeProvider => set.is_free_provider = result.value(),
                }
                set
            })
    }

    /// Derives the status and message by strict priority.
    ///
    /// MX failure, then disposable, then blacklisted are errors; free provider
    /// is a warning; anything else is valid.
    #[must_use]
    pub const fn verdict(&self) -> (ValidationStatus, &'static str) {
        if !self.mx_valid {
            (ValidationStatus::Error, "Domain has no valid MX records.")
        } else if self.is_disposable {
            (ValidationStatus::Error, "Email is from a disposable provider.")
        } else if self.is_blacklisted {
            (ValidationStatus::Error, "Domain is blacklisted.")
        } else if self.is_free_provider {
            (ValidationStatus::Warning, "Email is from a known free provider.")
        } else {
            (ValidationStatus::Valid, "Email appears valid.")
        }
    }
}

/// Immutable verdict for one address at one point in time.
///
/// The status is always derived from the signal set; there is no way to set
/// it independently. Re-validation produces a new report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    email: EmailAddress,
    signals: SignalSet,
    status: ValidationStatus,
    message: String,
    evaluated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Builds a report, stamping it with the clock's current time.
    #[must_use]
    pub fn new(email: EmailAddress, signals: SignalSet, clock: &impl Clock) -> Self {
        let (status, message) = signals.verdict();
        Self {
            email,
            signals,
            status,
            message: message.to_owned(),
            evaluated_at: clock.utc(),
        }
    }

    /// Returns the validated address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the domain the checks ran against.
    #[must_use]
    pub const fn domain(&self) -> &DomainName {
        self.email.domain()
    }

    /// Returns the raw signals.
    #[must_use]
    pub const fn signals(&self) -> SignalSet {
        self.signals
    }

    /// Returns whether an MX record was found.
    #[must_use]
    pub const fn mx_valid(&self) -> bool {
        self.signals.mx_valid
    }

    /// Returns whether the domain is disposable.
    #[must_use]
    pub const fn is_disposable(&self) -> bool {
        self.signals.is_disposable
    }

    /// Returns whether the domain is blacklisted.
    #[must_use]
    pub const fn is_blacklisted(&self) -> bool {
        self.signals.is_blacklisted
    }

    /// Returns whether the domain is a free provider.
    #[must_use]
    pub const fn is_free_provider(&self) -> bool {
        self.signals.is_free_provider
    }

    /// Returns the derived status.
    #[must_use]
    pub const fn status(&self) -> ValidationStatus {
        self.status
    }

    /// Returns the derived message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the report was produced.
    #[must_use]
    pub const fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }
}
