//! Signals produced by individual checkers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The binary property a checker tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// The domain publishes at least one mail exchanger.
    MxValid,
    /// The domain belongs to a throwaway mailbox service.
    Disposable,
    /// The domain is on the denylist.
    Blacklisted,
    /// The domain is a consumer webmail provider.
    FreeProvider,
}

impl Signal {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MxValid => "mx_valid",
            Self::Disposable => "disposable",
            Self::Blacklisted => "blacklisted",
            Self::FreeProvider => "free_provider",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one checker invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    signal: Signal,
    value: bool,
    detail: Option<String>,
}

impl CheckResult {
    /// Creates a result without detail.
    #[must_use]
    pub const fn new(signal: Signal, value: bool) -> Self {
        Self {
            signal,
            value,
            detail: None,
        }
    }

    /// Attaches a human-readable detail (resolver error, exchanger hosts).
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the tested signal.
    #[must_use]
    pub const fn signal(&self) -> Signal {
        self.signal
    }

    /// Returns the boolean outcome.
    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }

    /// Returns the optional detail.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}
