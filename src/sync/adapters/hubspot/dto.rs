//! DTOs for the HubSpot contacts and properties APIs.
//!
//! Responses decode into these transport shapes first and are then mapped
//! into [`ContactRef`] values in one pass.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::sync::domain::{
    ContactDraft, ContactId, ContactRef, CrmProperties, PROPERTY_EVALUATED_AT,
    PROPERTY_IS_BLACKLISTED, PROPERTY_IS_DISPOSABLE, PROPERTY_IS_FREE_PROVIDER, PROPERTY_MESSAGE,
    PROPERTY_MX_VALID, PROPERTY_STATUS,
};

pub(super) const PROFILE_PROPERTIES: &str = "email,firstname,lastname";
const CONTACT_PROPERTY_GROUP: &str = "contactinformation";

#[derive(Debug, Deserialize)]
pub(super) struct ContactPageDto {
    #[serde(default)]
    pub(super) results: Vec<ContactDto>,
    pub(super) paging: Option<PagingDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PagingDto {
    pub(super) next: Option<NextPageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NextPageDto {
    pub(super) after: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) properties: HashMap<String, Option<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BatchResponseDto {
    #[serde(default)]
    pub(super) results: Vec<ContactDto>,
}

#[derive(Debug, Serialize)]
pub(super) struct PropertyUpdateDto<'a> {
    pub(super) properties: &'a CrmProperties,
}

#[derive(Debug, Serialize)]
pub(super) struct BatchUpsertRequestDto<'a> {
    pub(super) inputs: Vec<BatchUpsertInputDto<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BatchUpsertInputDto<'a> {
    pub(super) id_property: &'static str,
    pub(super) id: &'a str,
    pub(super) properties: BTreeMap<&'a str, &'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PropertyDefinitionDto {
    pub(super) name: &'static str,
    pub(super) label: &'static str,
    pub(super) description: String,
    pub(super) group_name: &'static str,
    #[serde(rename = "type")]
    pub(super) property_type: &'static str,
    pub(super) field_type: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(super) options: Vec<PropertyOptionDto>,
}

#[derive(Debug, Serialize)]
pub(super) struct PropertyOptionDto {
    pub(super) label: &'static str,
    pub(super) value: &'static str,
}

impl ContactPageDto {
    pub(super) fn next_after(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|paging| paging.next.as_ref())
            .map(|next| next.after.as_str())
    }
}

impl ContactDto {
    pub(super) fn into_contact_ref(self) -> Result<ContactRef, String> {
        let contact_id = ContactId::new(self.id).map_err(|err| err.to_string())?;
        let mut properties = self.properties;
        let mut contact = ContactRef::new(contact_id);
        if let Some(Some(email)) = properties.remove("email") {
            contact = contact.with_email(email);
        }
        if let Some(Some(first_name)) = properties.remove("firstname") {
            contact = contact.with_first_name(first_name);
        }
        if let Some(Some(last_name)) = properties.remove("lastname") {
            contact = contact.with_last_name(last_name);
        }
        Ok(contact)
    }
}

impl<'a> BatchUpsertRequestDto<'a> {
    /// Single-input upsert keyed on the email property.
    pub(super) fn by_email(draft: &'a ContactDraft, properties: &'a CrmProperties) -> Self {
        let mut merged: BTreeMap<&'a str, &'a str> = properties.iter().collect();
        merged.insert("email", draft.email.as_str());
        if let Some(first_name) = draft.first_name.as_deref() {
            merged.insert("firstname", first_name);
        }
        if let Some(last_name) = draft.last_name.as_deref() {
            merged.insert("lastname", last_name);
        }
        Self {
            inputs: vec![BatchUpsertInputDto {
                id_property: "email",
                id: draft.email.as_str(),
                properties: merged,
            }],
        }
    }
}

const BOOLEAN_OPTIONS: [(&str, &str); 2] = [("True", "true"), ("False", "false")];

pub(super) fn property_definition(name: &'static str) -> PropertyDefinitionDto {
    let (label, property_type, field_type) = match name {
        PROPERTY_MX_VALID => ("Email MX Valid", "enumeration", "booleancheckbox"),
        PROPERTY_IS_DISPOSABLE => ("Email Is Disposable", "enumeration", "booleancheckbox"),
        PROPERTY_IS_BLACKLISTED => ("Email Is Blacklisted", "enumeration", "booleancheckbox"),
        PROPERTY_IS_FREE_PROVIDER => ("Email Is Free Provider", "enumeration", "booleancheckbox"),
        PROPERTY_STATUS => ("Email Validation Status", "string", "text"),
        PROPERTY_MESSAGE => ("Email Validation Message", "string", "text"),
        PROPERTY_EVALUATED_AT => ("Email Validated At", "datetime", "date"),
        _ => (name, "string", "text"),
    };
    let options = if property_type == "enumeration" {
        BOOLEAN_OPTIONS
            .iter()
            .map(|&(label, value)| PropertyOptionDto { label, value })
            .collect()
    } else {
        Vec::new()
    };
    PropertyDefinitionDto {
        name,
        label,
        description: format!("Stores the '{label}' aspect of email validation."),
        group_name: CONTACT_PROPERTY_GROUP,
        property_type,
        field_type,
        options,
    }
}
