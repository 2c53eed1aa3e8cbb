//! Application services for email validation.

mod aggregator;

pub use aggregator::ValidationService;
