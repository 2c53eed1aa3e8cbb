//! Report propagation for mailvet.
//!
//! Writes validation reports to two independently owned targets, the
//! relational store and the CRM, without making the writes transactional.
//! A failed write on one side never rolls back or blocks the other; later
//! re-validation reconciles any divergence.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Coordinator, bulk dispatcher and contact services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
