//! In-memory adapters for the sync ports.

mod crm;
mod store;

pub use crm::InMemoryCrmClient;
pub use store::InMemoryValidationStore;
