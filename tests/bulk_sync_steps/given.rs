//! Given steps for bulk sync BDD scenarios.

use super::world::{BulkWorld, parse_id};
use mailvet::sync::{domain::ContactRef, ports::CrmError};
use rstest_bdd_macros::given;

#[given(r#"a CRM contact "{id}" with email "{email}""#)]
fn crm_contact_with_email(
    world: &mut BulkWorld,
    id: String,
    email: String,
) -> Result<(), eyre::Report> {
    let contact = ContactRef::new(parse_id(&id)?).with_email(email);
    world.pending_contacts.push(contact);
    Ok(())
}

#[given(r#"a CRM contact "{id}" without email"#)]
fn crm_contact_without_email(world: &mut BulkWorld, id: String) -> Result<(), eyre::Report> {
    world.pending_contacts.push(ContactRef::new(parse_id(&id)?));
    Ok(())
}

#[given(r#"the store rejects writes for contact "{id}""#)]
fn store_rejects_contact(world: &mut BulkWorld, id: String) -> Result<(), eyre::Report> {
    world
        .store
        .fail_for(parse_id(&id)?)
        .map_err(|err| eyre::eyre!("store setup failed: {err}"))
}

#[given("the CRM rate-limits contact listing")]
fn crm_rate_limits_listing(world: &mut BulkWorld) {
    world.fetch_failure = Some(CrmError::RateLimited {
        message: "ten second limit reached".to_owned(),
    });
}
