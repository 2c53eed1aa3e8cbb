//! `PostgreSQL` adapter for the validation store.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresValidationStore, ValidationPgPool, build_pool};
