//! Email address and domain value types.

use super::ValidationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address split into its local part and lower-cased domain.
///
/// The value is immutable once parsed; every checker looks at the derived
/// [`DomainName`] rather than at the raw input. Serde goes through
/// [`EmailAddress::parse`], so decoded values hold the same invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress {
    address: String,
    local_part: String,
    domain: DomainName,
}

impl EmailAddress {
    /// Parses an address of the form `local@domain`.
    ///
    /// Surrounding whitespace is ignored. The split happens at the last `@`
    /// so quoted local parts containing `@` still resolve to the right domain.
    /// A single trailing root dot on the domain is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationDomainError::MalformedEmail`] when the input has no
    /// `@`, or when either side of it is empty.
    pub fn parse(input: &str) -> Result<Self, ValidationDomainError> {
        let trimmed = input.trim();
        let Some((local_part, domain)) = trimmed.rsplit_once('@') else {
            return Err(ValidationDomainError::MalformedEmail(input.to_owned()));
        };
        let host = domain.trim();
        let unrooted = host.strip_suffix('.').unwrap_or(host);
        if local_part.is_empty() || unrooted.is_empty() {
            return Err(ValidationDomainError::MalformedEmail(input.to_owned()));
        }

        Ok(Self {
            address: trimmed.to_owned(),
            local_part: local_part.to_owned(),
            domain: DomainName(unrooted.to_lowercase()),
        })
    }

    /// Returns the address as supplied (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Returns the part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Returns the lower-cased domain.
    #[must_use]
    pub const fn domain(&self) -> &DomainName {
        &self.domain
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.address
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Lower-cased domain portion of an [`EmailAddress`].
///
/// Only constructed by [`EmailAddress::parse`], so it serialises but never
/// deserialises.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Returns the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last dot-separated label, if the domain has more than one.
    #[must_use]
    pub fn top_level_label(&self) -> Option<&str> {
        self.0
            .rsplit_once('.')
            .map(|(_, tld)| tld)
            .filter(|tld| !tld.is_empty())
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
