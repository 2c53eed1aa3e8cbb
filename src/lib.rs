//! Mailvet: email validation with dual-write propagation.
//!
//! Each address is checked by independent signals (MX lookup, disposable,
//! blacklist and free-provider membership) that reduce to a single verdict.
//! Verdicts are then written to a relational store and to the CRM contact
//! they belong to, either one at a time or in a bounded bulk pass.
//!
//! # Architecture
//!
//! Mailvet follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (DNS, database, CRM)
//!
//! # Modules
//!
//! - [`validation`]: Checkers and the aggregator producing reports
//! - [`sync`]: Store and CRM propagation, single-contact and bulk
//! - [`config`]: Runtime settings
//! - [`telemetry`]: Tracing subscriber bootstrap

pub mod config;
pub mod sync;
pub mod telemetry;
pub mod validation;
