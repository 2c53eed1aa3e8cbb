//! Adapters for the store and CRM ports.

pub mod hubspot;
pub mod memory;
pub mod postgres;
