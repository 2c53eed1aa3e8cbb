//! Step definitions for bulk sync scenarios.

mod given;
mod then;
mod when;
pub mod world;
