//! Domain model for email validation.
//!
//! Parsing, per-checker signals, and the status derivation policy live here,
//! free of DNS or I/O concerns.

mod check;
mod email;
mod error;
mod report;

pub use check::{CheckResult, Signal};
pub use email::{DomainName, EmailAddress};
pub use error::ValidationDomainError;
pub use report::{SignalSet, ValidationReport, ValidationStatus};
