//! Application services for report propagation.

mod bulk;
mod contact;
mod coordinator;

pub use bulk::{BulkDispatch, BulkDispatcher, BulkSummary};
pub use contact::{ContactSyncError, ContactSyncService, ContactUpsert};
pub use coordinator::{SyncCoordinator, SyncOutcome};
