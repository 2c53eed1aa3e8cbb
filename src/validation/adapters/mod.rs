//! Resolver adapter implementations.

pub mod hickory;
pub mod memory;

pub use hickory::HickoryMxResolver;
pub use memory::StaticMxResolver;
