//! `PostgreSQL` store implementation for validation reports.

use super::{
    models::{NewContactRow, NewValidationRow},
    schema::{contacts, validation_results},
};
use crate::sync::{
    domain::ContactRef,
    ports::{StoreError, StoreResult, ValidationStore},
};
use crate::validation::domain::ValidationReport;
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::pg::upsert::excluded;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;
use tracing::debug;

/// `PostgreSQL` connection pool type used by the store.
pub type ValidationPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<ValidationPgPool, PoolError> {
    Pool::builder()
        .max_size(max_size.max(1))
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

/// `PostgreSQL`-backed validation store.
#[derive(Debug, Clone)]
pub struct PostgresValidationStore {
    pool: ValidationPgPool,
}

impl PostgresValidationStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ValidationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

#[async_trait]
impl ValidationStore for PostgresValidationStore {
    async fn upsert(&self, contact: &ContactRef, report: &ValidationReport) -> StoreResult<()> {
        let contact_row = to_contact_row(contact, report);
        let validation_row = to_validation_row(contact, report);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    upsert_contact(tx, &contact_row)?;
                    upsert_validation(tx, &validation_row)?;
                    Ok(())
                })
                .map_err(StoreError::persistence)?;
            debug!(contact_id = %contact_row.contact_id, "stored validation report");
            Ok(())
        })
        .await
    }
}

fn to_contact_row(contact: &ContactRef, report: &ValidationReport) -> NewContactRow {
    NewContactRow {
        contact_id: contact.contact_id().as_str().to_owned(),
        email: contact
            .email()
            .unwrap_or_else(|| report.email().as_str())
            .to_owned(),
        firstname: contact.first_name().map(str::to_owned),
        lastname: contact.last_name().map(str::to_owned),
        updated_at: Utc::now(),
    }
}

fn to_validation_row(contact: &ContactRef, report: &ValidationReport) -> NewValidationRow {
    NewValidationRow {
        contact_id: contact.contact_id().as_str().to_owned(),
        email: report.email().as_str().to_owned(),
        domain: report.domain().as_str().to_owned(),
        mx_valid: report.mx_valid(),
        is_disposable: report.is_disposable(),
        is_blacklisted: report.is_blacklisted(),
        is_free_provider: report.is_free_provider(),
        validation_status: report.status().as_str().to_owned(),
        validation_message: report.message().to_owned(),
        evaluated_at: report.evaluated_at(),
    }
}

fn upsert_contact(connection: &mut PgConnection, row: &NewContactRow) -> QueryResult<usize> {
    diesel::insert_into(contacts::table)
        .values(row)
        .on_conflict(contacts::contact_id)
        .do_update()
        .set((
            contacts::email.eq(excluded(contacts::email)),
            contacts::firstname.eq(excluded(contacts::firstname)),
            contacts::lastname.eq(excluded(contacts::lastname)),
            contacts::updated_at.eq(excluded(contacts::updated_at)),
        ))
        .execute(connection)
}

fn upsert_validation(connection: &mut PgConnection, row: &NewValidationRow) -> QueryResult<usize> {
    diesel::insert_into(validation_results::table)
        .values(row)
        .on_conflict(validation_results::contact_id)
        .do_update()
        .set((
            validation_results::email.eq(excluded(validation_results::email)),
            validation_results::domain.eq(excluded(validation_results::domain)),
            validation_results::mx_valid.eq(excluded(validation_results::mx_valid)),
            validation_results::is_disposable.eq(excluded(validation_results::is_disposable)),
            validation_results::is_blacklisted.eq(excluded(validation_results::is_blacklisted)),
            validation_results::is_free_provider
                .eq(excluded(validation_results::is_free_provider)),
            validation_results::validation_status
                .eq(excluded(validation_results::validation_status)),
            validation_results::validation_message
                .eq(excluded(validation_results::validation_message)),
            validation_results::evaluated_at.eq(excluded(validation_results::evaluated_at)),
        ))
        .execute(connection)
}
