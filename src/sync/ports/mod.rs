//! Port contracts for report propagation.
//!
//! Both collaborators are externally owned; the services never hold locks
//! across calls to them.

pub mod crm;
pub mod store;

pub use crm::{CrmClient, CrmError, CrmErrorKind, CrmResult};
pub use store::{StoreError, StoreResult, ValidationStore};

#[cfg(test)]
pub use crm::MockCrmClient;
#[cfg(test)]
pub use store::MockValidationStore;
