//! Unit tests for the sync context.

mod coordinator_tests;
mod domain_tests;

use crate::sync::domain::{ContactId, ContactRef};
use crate::validation::{
    adapters::StaticMxResolver, checkers::MxChecker, services::ValidationService,
    tests::FixedClock,
};
use std::sync::Arc;

pub(crate) fn contact_id(raw: &str) -> ContactId {
    ContactId::new(raw).expect("valid contact id")
}

pub(crate) fn contact(raw_id: &str, email: &str) -> ContactRef {
    ContactRef::new(contact_id(raw_id)).with_email(email)
}

/// Resolver that knows a handful of deliverable domains.
pub(crate) fn deliverable_resolver() -> StaticMxResolver {
    StaticMxResolver::with_domains([
        "acme.io",
        "globex.com",
        "initech.com",
        "gmail.com",
        "mailinator.com",
    ])
}

pub(crate) fn validation_service() -> ValidationService<FixedClock> {
    validation_service_with(deliverable_resolver())
}

pub(crate) fn validation_service_with(resolver: StaticMxResolver) -> ValidationService<FixedClock> {
    ValidationService::new(
        MxChecker::new(Arc::new(resolver)),
        Arc::new(FixedClock::at_epoch_offset(1_760_000_000)),
    )
}
