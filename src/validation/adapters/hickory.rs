//! Hickory-backed resolver adapter.

use crate::validation::ports::{MxLookupError, MxLookupResult, MxResolver};
use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use std::time::Duration;

/// Asynchronous DNS resolver for MX records.
#[derive(Clone)]
pub struct HickoryMxResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryMxResolver {
    /// Builds a resolver from the host's `/etc/resolv.conf` settings.
    ///
    /// # Errors
    ///
    /// Returns [`MxLookupError::Resolution`] when the system configuration
    /// cannot be read.
    pub fn from_system_conf(timeout: Duration) -> MxLookupResult<Self> {
        let (config, opts) =
            hickory_resolver::system_conf::read_system_conf().map_err(MxLookupError::resolution)?;
        Ok(Self::with_config(config, opts, timeout))
    }

    /// Builds a resolver against explicit upstream servers.
    #[must_use]
    pub fn with_config(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Self {
        opts.timeout = timeout;
        opts.attempts = 1;
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

impl std::fmt::Debug for HickoryMxResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryMxResolver").finish_non_exhaustive()
    }
}

#[async_trait]
impl MxResolver for HickoryMxResolver {
    async fn lookup_mx(&self, domain: &str) -> MxLookupResult<Vec<String>> {
        // Fully qualified so search domains are never appended.
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        match self.resolver.mx_lookup(fqdn.as_str()).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .map(|mx| mx.exchange().to_utf8().trim_end_matches('.').to_owned())
                .collect()),
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => {
                    Err(MxLookupError::NoRecords(domain.to_owned()))
                }
                ResolveErrorKind::Timeout => Err(MxLookupError::Timeout(domain.to_owned())),
                _ => Err(MxLookupError::resolution(err)),
            },
        }
    }
}
