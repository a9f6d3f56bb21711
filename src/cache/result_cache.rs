//! Get-or-fetch over a cache store

use super::store::CacheStore;
use super::types::{CacheEntry, CacheKey};
use crate::config::DEFAULT_CACHE_TTL_MINUTES;
use crate::error::Result;
use crate::types::{ListConfig, MovieRecord};
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use tracing::debug;

/// Serves list records from a store while they are fresh
#[derive(Debug, Clone)]
pub struct ResultCache<S> {
    store: S,
    ttl: Duration,
}

impl<S: CacheStore> ResultCache<S> {
    /// Cache with the default 2 hour window
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, Duration::minutes(DEFAULT_CACHE_TTL_MINUTES as i64))
    }

    /// Cache with a custom window
    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validity window of new entries
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Records of a live entry for `config`, if any
    pub async fn get_live(
        &self,
        config: &ListConfig,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<MovieRecord>>> {
        let key = CacheKey::from(config);
        Ok(self
            .store
            .get(&key)
            .await?
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.records))
    }

    /// Return cached records for `config`, or run `fetch` and cache its result.
    ///
    /// A failed fetch is propagated and leaves any existing (stale) entry as
    /// it was. Stale entries are never returned. No lock is held while
    /// `fetch` runs.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        config: &ListConfig,
        now: DateTime<Utc>,
        fetch: F,
    ) -> Result<Vec<MovieRecord>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<MovieRecord>>>,
    {
        if let Some(records) = self.get_live(config, now).await? {
            debug!("Cache hit for {} ({} records)", config, records.len());
            return Ok(records);
        }

        debug!("Cache miss for {}", config);
        let records = fetch().await?;

        let entry = CacheEntry::new(records.clone(), now, self.ttl);
        self.store.put(CacheKey::from(config), entry).await?;
        Ok(records)
    }
}
