//! CRM contact references.

use super::SyncDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External identifier of a CRM contact.
///
/// Also the primary key of the local store, so one identifier maps to at most
/// one row there and one record in the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Creates a validated contact identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyContactId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SyncDomainError::EmptyContactId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact as known to the CRM.
///
/// Treated as read-only input; changes flow back through the CRM client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRef {
    contact_id: ContactId,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl ContactRef {
    /// Creates a reference with only the identifier set.
    #[must_use]
    pub const fn new(contact_id: ContactId) -> Self {
        Self {
            contact_id,
            email: None,
            first_name: None,
            last_name: None,
        }
    }

    /// Sets the email address. Blank values are dropped.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    /// Sets the first name. Blank values are dropped.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = non_blank(first_name.into());
        self
    }

    /// Sets the last name. Blank values are dropped.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = non_blank(last_name.into());
        self
    }

    /// Returns the contact identifier.
    #[must_use]
    pub const fn contact_id(&self) -> &ContactId {
        &self.contact_id
    }

    /// Returns the email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the first name, if known.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the last name, if known.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}

/// Profile fields for a contact that may not exist in the CRM yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    /// Email address used as the CRM's natural key.
    pub email: String,
    /// Optional first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
