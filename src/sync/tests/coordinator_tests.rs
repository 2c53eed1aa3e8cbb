//! Dual-write coordinator tests.

use super::{contact, contact_id, validation_service};
use crate::sync::{
    adapters::memory::{InMemoryCrmClient, InMemoryValidationStore},
    domain::{PROPERTY_STATUS, WriteStatus},
    ports::{CrmError, CrmErrorKind, MockCrmClient, MockValidationStore, StoreError},
    services::SyncCoordinator,
};
use crate::validation::domain::ValidationReport;
use rstest::{fixture, rstest};
use std::sync::Arc;

struct Harness {
    store: Arc<InMemoryValidationStore>,
    crm: Arc<InMemoryCrmClient>,
    coordinator: SyncCoordinator<InMemoryValidationStore, InMemoryCrmClient>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryValidationStore::new());
    let crm = Arc::new(InMemoryCrmClient::with_contacts([contact(
        "101",
        "ada@acme.io",
    )]));
    let coordinator = SyncCoordinator::new(Arc::clone(&store), Arc::clone(&crm));
    Harness {
        store,
        crm,
        coordinator,
    }
}

async fn report_for(email: &str) -> ValidationReport {
    validation_service()
        .evaluate(email)
        .await
        .expect("well-formed address")
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_contact_skips_both_writes() {
    let mut store = MockValidationStore::new();
    store.expect_upsert().never();
    let mut crm = MockCrmClient::new();
    crm.expect_upsert_properties().never();
    let coordinator = SyncCoordinator::new(Arc::new(store), Arc::new(crm));

    let outcome = coordinator.sync(report_for("ada@acme.io").await, None).await;

    assert!(outcome.store_write().is_skipped());
    assert!(outcome.crm_write().is_skipped());
    assert_eq!(outcome.report().email().as_str(), "ada@acme.io");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn both_writes_succeed_for_known_contact(harness: Harness) {
    let ada = contact("101", "ada@acme.io");

    let outcome = harness
        .coordinator
        .sync(report_for("ada@acme.io").await, Some(&ada))
        .await;

    assert!(outcome.fully_synced());
    let stored = harness
        .store
        .report_for(ada.contact_id())
        .expect("store readable")
        .expect("row written");
    assert_eq!(&stored, outcome.report());
    let properties = harness
        .crm
        .properties_for(ada.contact_id())
        .expect("crm readable")
        .expect("properties written");
    assert_eq!(properties.get(PROPERTY_STATUS), Some("valid"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_failure_does_not_block_crm_write(harness: Harness) {
    let ada = contact("101", "ada@acme.io");
    harness
        .store
        .fail_for(ada.contact_id().clone())
        .expect("store writable");

    let outcome = harness
        .coordinator
        .sync(report_for("ada@acme.io").await, Some(&ada))
        .await;

    assert!(matches!(
        outcome.store_write(),
        WriteStatus::Failed(StoreError::Persistence(_))
    ));
    assert!(outcome.crm_write().is_ok());
    assert!(
        harness
            .crm
            .properties_for(ada.contact_id())
            .expect("crm readable")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn crm_rate_limit_is_classified_and_store_still_written(harness: Harness) {
    let ada = contact("101", "ada@acme.io");
    harness
        .crm
        .fail_updates_for(
            ada.contact_id().clone(),
            CrmError::RateLimited {
                message: "slow down".to_owned(),
            },
        )
        .expect("crm writable");

    let outcome = harness
        .coordinator
        .sync(report_for("ada@acme.io").await, Some(&ada))
        .await;

    assert!(outcome.store_write().is_ok());
    let failure = outcome.crm_write().failure().expect("crm write failed");
    assert_eq!(failure.kind(), CrmErrorKind::RateLimited);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_crm_contact_reports_not_found(harness: Harness) {
    let stranger = contact("999", "grace@globex.com");

    let outcome = harness
        .coordinator
        .sync(report_for("grace@globex.com").await, Some(&stranger))
        .await;

    assert!(outcome.store_write().is_ok());
    assert_eq!(
        outcome.crm_write().failure().map(CrmError::kind),
        Some(CrmErrorKind::NotFound)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_sync_overwrites_the_stored_row(harness: Harness) {
    let ada = contact("101", "ada@acme.io");

    for _ in 0..2 {
        let outcome = harness
            .coordinator
            .sync(report_for("ada@acme.io").await, Some(&ada))
            .await;
        assert!(outcome.fully_synced());
    }

    assert_eq!(harness.store.row_count().expect("store readable"), 1);
    assert_eq!(harness.store.write_count().expect("store readable"), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn mocked_writes_receive_the_contact_and_report() {
    let mut store = MockValidationStore::new();
    store
        .expect_upsert()
        .times(1)
        .returning(|contact, report| {
            assert_eq!(contact.contact_id().as_str(), "42");
            assert_eq!(report.email().as_str(), "ops@initech.com");
            Ok(())
        });
    let mut crm = MockCrmClient::new();
    crm.expect_upsert_properties()
        .times(1)
        .returning(|id, properties| {
            assert_eq!(id, &contact_id("42"));
            assert_eq!(properties.get(PROPERTY_STATUS), Some("valid"));
            Ok(())
        });
    let coordinator = SyncCoordinator::new(Arc::new(store), Arc::new(crm));

    let outcome = coordinator
        .sync(
            report_for("ops@initech.com").await,
            Some(&contact("42", "ops@initech.com")),
        )
        .await;

    assert!(outcome.fully_synced());
}
