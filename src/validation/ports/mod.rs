//! Port contracts for email validation.

pub mod resolver;

pub use resolver::{MxLookupError, MxLookupResult, MxResolver};

#[cfg(test)]
pub use resolver::MockMxResolver;
