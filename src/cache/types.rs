//! Cache entry types
//!
//! These types are serialized to JSON when the cache is persisted.

use crate::types::{ListConfig, MovieRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Cache key for one list of one user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&ListConfig> for CacheKey {
    fn from(config: &ListConfig) -> Self {
        Self(format!("imdb_list:{}:{}", config.user_id, config.list))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Records of one complete retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Records in retrieval order
    pub records: Vec<MovieRecord>,
    /// When the retrieval finished
    pub created_at: DateTime<Utc>,
    /// Validity window in seconds
    pub ttl_seconds: i64,
}

impl CacheEntry {
    /// Create an entry valid for `ttl` from `created_at`
    pub fn new(records: Vec<MovieRecord>, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            records,
            created_at,
            ttl_seconds: ttl.num_seconds(),
        }
    }

    /// Validity window, clamped to what `Duration` can hold
    pub fn ttl(&self) -> Duration {
        Duration::try_seconds(self.ttl_seconds).unwrap_or(if self.ttl_seconds < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        })
    }

    /// When the entry stops being served, `None` if past the representable range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.checked_add_signed(self.ttl())
    }

    /// `now - created_at < ttl`
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < self.ttl()
    }
}

/// Every entry of a store, as persisted on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Entries by key
    #[serde(default)]
    pub entries: HashMap<CacheKey, CacheEntry>,
}

impl CacheSnapshot {
    /// Drop entries no longer live at `now`
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| entry.is_live(now));
    }
}
