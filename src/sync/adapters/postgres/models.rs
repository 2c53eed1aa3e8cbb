//! Diesel row models for contact and validation persistence.

use super::schema::{contacts, validation_results};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Insert model for contact profiles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub struct NewContactRow {
    /// CRM contact identifier.
    pub contact_id: String,
    /// Email address.
    pub email: String,
    /// Optional first name.
    pub firstname: Option<String>,
    /// Optional last name.
    pub lastname: Option<String>,
    /// Write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for validation reports.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = validation_results)]
pub struct NewValidationRow {
    /// CRM contact identifier.
    pub contact_id: String,
    /// Validated email address.
    pub email: String,
    /// Domain the checks ran against.
    pub domain: String,
    /// MX verdict.
    pub mx_valid: bool,
    /// Disposable verdict.
    pub is_disposable: bool,
    /// Blacklist verdict.
    pub is_blacklisted: bool,
    /// Free-provider verdict.
    pub is_free_provider: bool,
    /// Derived status.
    pub validation_status: String,
    /// Derived message.
    pub validation_message: String,
    /// Evaluation timestamp.
    pub evaluated_at: DateTime<Utc>,
}
