//! CRM property mapping for validation reports.

use crate::validation::domain::ValidationReport;
use serde::Serialize;
use std::collections::BTreeMap;

/// CRM property holding the MX verdict.
pub const PROPERTY_MX_VALID: &str = "email_valid_mx";
/// CRM property holding the disposable verdict.
pub const PROPERTY_IS_DISPOSABLE: &str = "email_is_disposable";
/// CRM property holding the blacklist verdict.
pub const PROPERTY_IS_BLACKLISTED: &str = "email_is_blacklisted";
/// CRM property holding the free-provider verdict.
pub const PROPERTY_IS_FREE_PROVIDER: &str = "email_is_free_provider";
/// CRM property holding the overall status.
pub const PROPERTY_STATUS: &str = "email_validation_status";
/// CRM property holding the status message.
pub const PROPERTY_MESSAGE: &str = "email_validation_message";
/// CRM property holding the evaluation timestamp.
pub const PROPERTY_EVALUATED_AT: &str = "email_validated_at";

/// Every custom property written by a sync, in provisioning order.
pub const VALIDATION_PROPERTY_NAMES: [&str; 7] = [
    PROPERTY_MX_VALID,
    PROPERTY_IS_DISPOSABLE,
    PROPERTY_IS_BLACKLISTED,
    PROPERTY_IS_FREE_PROVIDER,
    PROPERTY_STATUS,
    PROPERTY_MESSAGE,
    PROPERTY_EVALUATED_AT,
];

/// Report fields encoded as CRM string properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CrmProperties(BTreeMap<String, String>);

impl CrmProperties {
    /// Encodes a report. Booleans become `"true"`/`"false"`.
    #[must_use]
    pub fn from_report(report: &ValidationReport) -> Self {
        let entries = [
            (PROPERTY_MX_VALID, report.mx_valid().to_string()),
            (PROPERTY_IS_DISPOSABLE, report.is_disposable().to_string()),
            (PROPERTY_IS_BLACKLISTED, report.is_blacklisted().to_string()),
            (PROPERTY_IS_FREE_PROVIDER, report.is_free_provider().to_string()),
            (PROPERTY_STATUS, report.status().as_str().to_owned()),
            (PROPERTY_MESSAGE, report.message().to_owned()),
            (PROPERTY_EVALUATED_AT, report.evaluated_at().to_rfc3339()),
        ];
        Self(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value))
                .collect(),
        )
    }

    /// Returns the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no properties are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
