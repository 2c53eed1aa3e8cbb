//! In-memory resolver adapter for validation tests.

use crate::validation::ports::{MxLookupError, MxLookupResult, MxResolver};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Resolver answering from a fixed table.
///
/// Domains without an entry report [`MxLookupError::NoRecords`]. Individual
/// domains can be made to fail or to stall, which exercises the checker's
/// timeout without touching the network.
#[derive(Debug, Clone, Default)]
pub struct StaticMxResolver {
    state: Arc<RwLock<StaticResolverState>>,
    lookups: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct StaticResolverState {
    records: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    stalled: HashMap<String, Duration>,
}

impl StaticMxResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver where every listed domain has one exchanger.
    #[must_use]
    pub fn with_domains<'a>(domains: impl IntoIterator<Item = &'a str>) -> Self {
        let resolver = Self::new();
        if let Ok(mut state) = resolver.state.write() {
            for domain in domains {
                state
                    .records
                    .insert(domain.to_owned(), vec![format!("mx.{domain}")]);
            }
        }
        resolver
    }

    /// Publishes exchangers for `domain`, replacing existing entries.
    ///
    /// # Errors
    ///
    /// Returns resolver errors when lock acquisition fails.
    pub fn set_records(
        &self,
        domain: impl Into<String>,
        exchangers: Vec<String>,
    ) -> MxLookupResult<()> {
        self.write_state()?
            .records
            .insert(domain.into(), exchangers);
        Ok(())
    }

    /// Makes lookups for `domain` fail with a resolver error.
    ///
    /// # Errors
    ///
    /// Returns resolver errors when lock acquisition fails.
    pub fn set_failing(&self, domain: impl Into<String>) -> MxLookupResult<()> {
        self.write_state()?.failing.insert(domain.into());
        Ok(())
    }

    /// Makes lookups for `domain` sleep for `delay` before answering.
    ///
    /// # Errors
    ///
    /// Returns resolver errors when lock acquisition fails.
    pub fn set_stalled(&self, domain: impl Into<String>, delay: Duration) -> MxLookupResult<()> {
        self.write_state()?.stalled.insert(domain.into(), delay);
        Ok(())
    }

    /// Returns how many lookups have been issued.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn write_state(&self) -> MxLookupResult<std::sync::RwLockWriteGuard<'_, StaticResolverState>> {
        self.state
            .write()
            .map_err(|err| MxLookupError::resolution(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl MxResolver for StaticMxResolver {
    async fn lookup_mx(&self, domain: &str) -> MxLookupResult<Vec<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let (delay, answer) = {
            let state = self
                .state
                .read()
                .map_err(|err| MxLookupError::resolution(std::io::Error::other(err.to_string())))?;
            let answer = if state.failing.contains(domain) {
                Err(MxLookupError::resolution(std::io::Error::other(format!(
                    "SERVFAIL for {domain}"
                ))))
            } else {
                state
                    .records
                    .get(domain)
                    .cloned()
                    .ok_or_else(|| MxLookupError::NoRecords(domain.to_owned()))
            };
            (state.stalled.get(domain).copied(), answer)
        };

        if let Some(pause) = delay {
            tokio::time::sleep(pause).await;
        }
        answer
    }
}
