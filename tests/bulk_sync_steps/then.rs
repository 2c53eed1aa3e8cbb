//! Then steps for bulk sync BDD scenarios.

use super::world::{BulkWorld, parse_id};
use mailvet::sync::ports::CrmErrorKind;
use rstest_bdd_macros::then;

#[then("{count:usize} contacts were scheduled")]
fn contacts_scheduled(world: &BulkWorld, count: usize) -> Result<(), eyre::Report> {
    let scheduled = world.summary()?.scheduled;
    if scheduled != count {
        return Err(eyre::eyre!("expected {count} scheduled, found {scheduled}"));
    }
    Ok(())
}

#[then(r#"contact "{id}" is stored"#)]
fn contact_is_stored(world: &BulkWorld, id: String) -> Result<(), eyre::Report> {
    let stored = world
        .store
        .report_for(&parse_id(&id)?)
        .map_err(|err| eyre::eyre!("store read failed: {err}"))?;
    if stored.is_none() {
        return Err(eyre::eyre!("expected contact {id} to be stored"));
    }
    Ok(())
}

#[then(r#"contact "{id}" is not stored"#)]
fn contact_is_not_stored(world: &BulkWorld, id: String) -> Result<(), eyre::Report> {
    let stored = world
        .store
        .report_for(&parse_id(&id)?)
        .map_err(|err| eyre::eyre!("store read failed: {err}"))?;
    if stored.is_some() {
        return Err(eyre::eyre!("expected contact {id} to be absent from the store"));
    }
    Ok(())
}

#[then("every contact has CRM validation properties")]
fn every_contact_has_properties(world: &BulkWorld) -> Result<(), eyre::Report> {
    let crm = world
        .crm
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no CRM in scenario world"))?;
    for contact in &world.pending_contacts {
        let properties = crm
            .properties_for(contact.contact_id())
            .map_err(|err| eyre::eyre!("CRM read failed: {err}"))?;
        if properties.is_none() {
            return Err(eyre::eyre!(
                "contact {} has no CRM validation properties",
                contact.contact_id()
            ));
        }
    }
    Ok(())
}

#[then("{count:usize} store failure was recorded")]
fn store_failures_recorded(world: &BulkWorld, count: usize) -> Result<(), eyre::Report> {
    let failures = world.summary()?.store_failures;
    if failures != count {
        return Err(eyre::eyre!("expected {count} store failures, found {failures}"));
    }
    Ok(())
}

#[then("the run fails as rate limited")]
fn run_fails_rate_limited(world: &BulkWorld) -> Result<(), eyre::Report> {
    let error = world
        .run_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the run to fail"))?;
    if error.kind() != CrmErrorKind::RateLimited {
        return Err(eyre::eyre!("expected rate limit, got {error}"));
    }
    Ok(())
}

#[then("no store writes were made")]
fn no_store_writes(world: &BulkWorld) -> Result<(), eyre::Report> {
    let writes = world
        .store
        .write_count()
        .map_err(|err| eyre::eyre!("store read failed: {err}"))?;
    if writes != 0 {
        return Err(eyre::eyre!("expected no store writes, found {writes}"));
    }
    Ok(())
}
