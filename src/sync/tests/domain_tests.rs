//! Tests for sync domain values.

use super::contact_id;
use crate::sync::domain::{
    ContactId, ContactRef, CrmProperties, PROPERTY_EVALUATED_AT, PROPERTY_IS_DISPOSABLE,
    PROPERTY_MESSAGE, PROPERTY_MX_VALID, PROPERTY_STATUS, SyncDomainError,
    VALIDATION_PROPERTY_NAMES, WriteStatus,
};
use crate::validation::{
    domain::{EmailAddress, SignalSet, ValidationReport},
    tests::FixedClock,
};
use rstest::rstest;

fn report(signals: SignalSet) -> ValidationReport {
    ValidationReport::new(
        EmailAddress::parse("ada@acme.io").expect("valid address"),
        signals,
        &FixedClock::at_epoch_offset(0),
    )
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_contact_id_is_rejected(#[case] raw: &str) {
    assert_eq!(ContactId::new(raw), Err(SyncDomainError::EmptyContactId));
}

#[test]
fn contact_id_is_trimmed() {
    assert_eq!(contact_id("  1501 ").as_str(), "1501");
}

#[test]
fn blank_profile_fields_are_dropped() {
    let contact = ContactRef::new(contact_id("7"))
        .with_email("  ")
        .with_first_name("Ada")
        .with_last_name("");

    assert_eq!(contact.email(), None);
    assert_eq!(contact.first_name(), Some("Ada"));
    assert_eq!(contact.last_name(), None);
}

#[test]
fn properties_cover_every_validation_field() {
    let properties = CrmProperties::from_report(&report(SignalSet {
        mx_valid: true,
        ..SignalSet::default()
    }));

    assert_eq!(properties.len(), VALIDATION_PROPERTY_NAMES.len());
    for name in VALIDATION_PROPERTY_NAMES {
        assert!(properties.get(name).is_some(), "missing property {name}");
    }
}

#[test]
fn properties_encode_booleans_and_status_in_lower_case() {
    let properties = CrmProperties::from_report(&report(SignalSet {
        mx_valid: true,
        is_disposable: true,
        ..SignalSet::default()
    }));

    assert_eq!(properties.get(PROPERTY_MX_VALID), Some("true"));
    assert_eq!(properties.get(PROPERTY_IS_DISPOSABLE), Some("true"));
    assert_eq!(properties.get(PROPERTY_STATUS), Some("error"));
    assert_eq!(
        properties.get(PROPERTY_MESSAGE),
        Some("Email is from a disposable provider.")
    );
    assert_eq!(
        properties.get(PROPERTY_EVALUATED_AT),
        Some("1970-01-01T00:00:00+00:00")
    );
}

#[test]
fn properties_serialise_as_flat_map() {
    let properties = CrmProperties::from_report(&report(SignalSet::default()));
    let json = serde_json::to_value(&properties).expect("properties should encode");

    assert_eq!(json[PROPERTY_MX_VALID], "false");
    assert_eq!(json[PROPERTY_STATUS], "error");
}

#[test]
fn write_status_reflects_result() {
    let ok: WriteStatus<String> = WriteStatus::from_result(Ok(()));
    let failed = WriteStatus::from_result(Err("down".to_owned()));

    assert!(ok.is_ok());
    assert_eq!(ok.failure(), None);
    assert!(!failed.is_ok());
    assert_eq!(failed.failure().map(String::as_str), Some("down"));
    assert!(WriteStatus::<String>::Skipped.is_skipped());
}
