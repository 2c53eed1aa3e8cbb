//! Step definitions for email validation scenarios.

mod given;
mod then;
mod when;
pub mod world;
