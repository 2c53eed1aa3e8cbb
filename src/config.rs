//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from CLI arguments, `MAILVET_*` environment variables and an
//! optional configuration file, in that order of precedence.

use crate::telemetry::{LogFormat, UnknownLogFormat};
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CRM_BASE_URL: &str = "https://api.hubapi.com";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting the caller needs was not provided.
    #[error("missing required setting '{0}'")]
    Missing(&'static str),

    /// The CRM base URL does not parse.
    #[error("invalid CRM base URL '{url}': {reason}")]
    InvalidUrl {
        /// Configured value.
        url: String,
        /// Parser detail.
        reason: String,
    },

    /// The log format is not recognised.
    #[error(transparent)]
    LogFormat(#[from] UnknownLogFormat),
}

/// Settings for the bulk validation binary and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MAILVET")]
pub struct Settings {
    /// `PostgreSQL` connection string.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 8)]
    pub database_pool_size: u32,
    /// CRM API base URL.
    pub crm_base_url: Option<String>,
    /// CRM private-app access token.
    pub crm_access_token: Option<String>,
    /// CRM request timeout in milliseconds.
    #[ortho_config(default = 10_000)]
    pub crm_timeout_ms: u64,
    /// Contacts requested per CRM page.
    #[ortho_config(default = 100)]
    pub crm_page_size: u32,
    /// Per-lookup DNS timeout in milliseconds.
    #[ortho_config(default = 5_000)]
    pub dns_timeout_ms: u64,
    /// Maximum contacts validated at once during a bulk run.
    #[ortho_config(default = 4)]
    pub bulk_concurrency: usize,
    /// Log output format, `plain` or `json`.
    pub log_format: Option<String>,
}

impl Settings {
    /// Returns the database connection string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        required(self.database_url.as_deref(), "database_url")
    }

    /// Returns the CRM access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when unset or blank.
    pub fn crm_access_token(&self) -> Result<&str, ConfigError> {
        required(self.crm_access_token.as_deref(), "crm_access_token")
    }

    /// Returns the CRM base URL, falling back to the public HubSpot API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the value does not parse.
    pub fn crm_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .crm_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CRM_BASE_URL);
        Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
            url: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Returns the CRM request timeout.
    #[must_use]
    pub const fn crm_timeout(&self) -> Duration {
        Duration::from_millis(self.crm_timeout_ms)
    }

    /// Returns the per-lookup DNS timeout.
    #[must_use]
    pub const fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    /// Returns the bulk concurrency ceiling, never less than one.
    #[must_use]
    pub fn bulk_concurrency(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.bulk_concurrency).unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the log format, defaulting to plain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogFormat`] for unknown values.
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), str::parse)
            .map_err(ConfigError::from)
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}
