//! In-memory CRM client for sync tests.

use crate::sync::{
    domain::{ContactDraft, ContactId, ContactRef, CrmProperties},
    ports::{CrmClient, CrmError, CrmResult},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory CRM.
///
/// Contacts are returned in identifier order. New contacts receive
/// sequential numeric identifiers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCrmClient {
    state: Arc<RwLock<InMemoryCrmState>>,
}

#[derive(Debug, Default)]
struct InMemoryCrmState {
    contacts: BTreeMap<ContactId, ContactRef>,
    properties: HashMap<ContactId, CrmProperties>,
    provisioned: BTreeSet<String>,
    failing_updates: HashMap<ContactId, CrmError>,
    fetch_failure: Option<CrmError>,
    next_id: u64,
}

impl InMemoryCrmClient {
    /// Creates an empty CRM.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a CRM pre-populated with `contacts`.
    #[must_use]
    pub fn with_contacts(contacts: impl IntoIterator<Item = ContactRef>) -> Self {
        let client = Self::new();
        if let Ok(mut state) = client.state.write() {
            for contact in contacts {
                state.contacts.insert(contact.contact_id().clone(), contact);
            }
        }
        client
    }

    /// Makes property updates for `contact_id` fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when lock acquisition fails.
    pub fn fail_updates_for(&self, contact_id: ContactId, error: CrmError) -> CrmResult<()> {
        self.write_state()?.failing_updates.insert(contact_id, error);
        Ok(())
    }

    /// Makes contact listing fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when lock acquisition fails.
    pub fn fail_fetch(&self, error: CrmError) -> CrmResult<()> {
        self.write_state()?.fetch_failure = Some(error);
        Ok(())
    }

    /// Returns the validation properties last written for `contact_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when lock acquisition fails.
    pub fn properties_for(&self, contact_id: &ContactId) -> CrmResult<Option<CrmProperties>> {
        Ok(self.read_state()?.properties.get(contact_id).cloned())
    }

    /// Returns the contact stored under `contact_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when lock acquisition fails.
    pub fn contact(&self, contact_id: &ContactId) -> CrmResult<Option<ContactRef>> {
        Ok(self.read_state()?.contacts.get(contact_id).cloned())
    }

    /// Returns the names of provisioned custom properties.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError`] when lock acquisition fails.
    pub fn provisioned_properties(&self) -> CrmResult<Vec<String>> {
        Ok(self.read_state()?.provisioned.iter().cloned().collect())
    }

    fn read_state(&self) -> CrmResult<std::sync::RwLockReadGuard<'_, InMemoryCrmState>> {
        self.state
            .read()
            .map_err(|err| CrmError::transport(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> CrmResult<std::sync::RwLockWriteGuard<'_, InMemoryCrmState>> {
        self.state
            .write()
            .map_err(|err| CrmError::transport(std::io::Error::other(err.to_string())))
    }
}

impl InMemoryCrmState {
    fn find_by_email(&self, email: &str) -> Option<ContactId> {
        self.contacts
            .values()
            .find(|contact| {
                contact
                    .email()
                    .is_some_and(|known| known.eq_ignore_ascii_case(email))
            })
            .map(|contact| contact.contact_id().clone())
    }

    fn allocate_id(&mut self) -> CrmResult<ContactId> {
        loop {
            self.next_id += 1;
            let candidate = ContactId::new(self.next_id.to_string()).map_err(|err| {
                CrmError::Decode {
                    message: err.to_string(),
                }
            })?;
            if !self.contacts.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

#[async_trait]
impl CrmClient for InMemoryCrmClient {
    async fn ensure_validation_properties(&self) -> CrmResult<()> {
        let mut state = self.write_state()?;
        state.provisioned.extend(
            crate::sync::domain::VALIDATION_PROPERTY_NAMES
                .iter()
                .map(|name| (*name).to_owned()),
        );
        Ok(())
    }

    async fn fetch_all_contacts(&self) -> CrmResult<Vec<ContactRef>> {
        let state = self.read_state()?;
        if let Some(error) = &state.fetch_failure {
            return Err(error.clone());
        }
        Ok(state.contacts.values().cloned().collect())
    }

    async fn upsert_properties(
        &self,
        contact_id: &ContactId,
        properties: &CrmProperties,
    ) -> CrmResult<()> {
        let mut state = self.write_state()?;
        if let Some(error) = state.failing_updates.get(contact_id) {
            return Err(error.clone());
        }
        if !state.contacts.contains_key(contact_id) {
            return Err(CrmError::NotFound {
                message: format!("contact {contact_id} does not exist"),
            });
        }
        state
            .properties
            .insert(contact_id.clone(), properties.clone());
        Ok(())
    }

    async fn create_or_update_contact(
        &self,
        draft: &ContactDraft,
        properties: &CrmProperties,
    ) -> CrmResult<ContactRef> {
        let mut state = self.write_state()?;
        let contact_id = match state.find_by_email(&draft.email) {
            Some(existing) => existing,
            None => state.allocate_id()?,
        };
        if let Some(error) = state.failing_updates.get(&contact_id) {
            return Err(error.clone());
        }

        let previous = state.contacts.get(&contact_id).cloned();
        let mut contact = ContactRef::new(contact_id.clone()).with_email(draft.email.clone());
        let first_name = draft
            .first_name
            .clone()
            .or_else(|| previous.as_ref().and_then(|c| c.first_name().map(str::to_owned)));
        let last_name = draft
            .last_name
            .clone()
            .or_else(|| previous.as_ref().and_then(|c| c.last_name().map(str::to_owned)));
        if let Some(first_name) = first_name {
            contact = contact.with_first_name(first_name);
        }
        if let Some(last_name) = last_name {
            contact = contact.with_last_name(last_name);
        }

        state.contacts.insert(contact_id.clone(), contact.clone());
        state.properties.insert(contact_id, properties.clone());
        Ok(contact)
    }
}
