//! Email validation for mailvet.
//!
//! Fans an address out to independent checkers (MX lookup plus disposable,
//! blacklist and free-provider membership tests) and reduces their signals to
//! a single verdict. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Checker variants in [`checkers`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod checkers;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
