//! Validates every CRM contact once and writes the verdicts back.
//!
//! Usage:
//!
//! ```text
//! MAILVET_DATABASE_URL=postgres://... MAILVET_CRM_ACCESS_TOKEN=... bulk_validate
//! ```
//!
//! Settings may also be passed as CLI flags or a config file; see
//! [`mailvet::config::Settings`]. The run provisions the CRM's validation
//! properties, schedules one validate-and-sync task per contact, and exits
//! once every task has finished.

use eyre::{Result, WrapErr};
use mailvet::config::Settings;
use mailvet::sync::{
    adapters::{
        hubspot::HubSpotCrmClient,
        postgres::{PostgresValidationStore, build_pool},
    },
    ports::CrmClient,
    services::BulkDispatcher,
};
use mailvet::telemetry;
use mailvet::validation::{
    adapters::HickoryMxResolver, checkers::MxChecker, services::ValidationService,
};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().wrap_err("failed to load settings")?;
    telemetry::init(settings.log_format()?);

    let pool = build_pool(settings.database_url()?, settings.database_pool_size)
        .wrap_err("failed to open database pool")?;
    let store = Arc::new(PostgresValidationStore::new(pool));

    let crm = Arc::new(
        HubSpotCrmClient::new(
            settings.crm_base_url()?,
            settings.crm_access_token()?,
            settings.crm_timeout(),
            settings.crm_page_size,
        )
        .wrap_err("failed to build CRM client")?,
    );
    crm.ensure_validation_properties()
        .await
        .wrap_err("failed to provision CRM validation properties")?;

    let resolver = HickoryMxResolver::from_system_conf(settings.dns_timeout())
        .wrap_err("failed to configure DNS resolver")?;
    let validation = ValidationService::new(
        MxChecker::with_timeout(Arc::new(resolver), settings.dns_timeout()),
        Arc::new(DefaultClock),
    );

    let dispatcher = BulkDispatcher::new(validation, store, crm, settings.bulk_concurrency());
    let dispatch = dispatcher
        .dispatch_all()
        .await
        .wrap_err("failed to fetch CRM contacts")?;
    info!(scheduled = dispatch.count(), "waiting for bulk validation");

    let summary = dispatch.wait().await;
    info!(
        scheduled = summary.scheduled,
        synced = summary.synced,
        store_failures = summary.store_failures,
        crm_failures = summary.crm_failures,
        input_errors = summary.input_errors,
        aborted = summary.aborted,
        "bulk validation finished"
    );
    Ok(())
}
