//! Domain model for propagating validation reports.
//!
//! Contact references, the CRM property encoding of a report, and per-target
//! write outcomes. Store and CRM transports stay outside this boundary.

mod contact;
mod error;
mod properties;
mod write;

pub use contact::{ContactDraft, ContactId, ContactRef};
pub use error::SyncDomainError;
pub use properties::{
    CrmProperties, PROPERTY_EVALUATED_AT, PROPERTY_IS_BLACKLISTED, PROPERTY_IS_DISPOSABLE,
    PROPERTY_IS_FREE_PROVIDER, PROPERTY_MESSAGE, PROPERTY_MX_VALID, PROPERTY_STATUS,
    VALIDATION_PROPERTY_NAMES,
};
pub use write::WriteStatus;
