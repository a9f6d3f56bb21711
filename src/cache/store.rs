//! Cache storage backends
//!
//! Both stores keep entries in memory behind a lock; `FileStore` also
//! persists them as JSON with atomic writes. Every `put` drops entries
//! that expired before the new entry was created.

use super::types::{CacheEntry, CacheKey, CacheSnapshot};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Keyed storage for cache entries.
///
/// `put` replaces the whole entry for a key; readers never see a partial
/// entry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Entry stored under `key`, live or not
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    /// Store `entry` under `key`, replacing any previous entry
    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<()>;

    /// Copy of every stored entry
    async fn snapshot(&self) -> Result<CacheSnapshot>;
}

#[async_trait]
impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        (**self).get(key).await
    }

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<()> {
        (**self).put(key, entry).await
    }

    async fn snapshot(&self) -> Result<CacheSnapshot> {
        (**self).snapshot().await
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<RwLock<CacheSnapshot>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.snapshot.read().await.entries.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.snapshot.read().await.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        Ok(self.snapshot.read().await.entries.get(key).cloned())
    }

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<()> {
        let mut snapshot = self.snapshot.write().await;
        snapshot.prune(entry.created_at);
        snapshot.entries.insert(key, entry);
        Ok(())
    }

    async fn snapshot(&self) -> Result<CacheSnapshot> {
        Ok(self.snapshot.read().await.clone())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Store persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the cache file
    path: PathBuf,
    /// Current entries (cached)
    snapshot: Arc<RwLock<CacheSnapshot>>,
    /// Serializes writers so saves reach the disk in order
    save_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open a cache file, loading existing entries if present
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::cache(format!("Failed to read cache file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::cache(format!("Failed to parse cache file: {e}")))?
        } else {
            CacheSnapshot::default()
        };

        debug!(
            "Opened cache file {} with {} entries",
            path.display(),
            snapshot.entries.len()
        );

        Ok(Self {
            path,
            snapshot: Arc::new(RwLock::new(snapshot)),
            save_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Get the cache file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write entries to disk
    async fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| Error::cache(format!("Failed to serialize cache: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::cache(format!("Failed to write cache file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::cache(format!("Failed to rename cache file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        Ok(self.snapshot.read().await.entries.get(key).cloned())
    }

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<()> {
        // Readers only wait for the in-memory swap, never for disk I/O
        let _save = self.save_lock.lock().await;
        let mut next = self.snapshot.read().await.clone();
        next.prune(entry.created_at);
        next.entries.insert(key, entry);
        self.save(&next).await?;
        *self.snapshot.write().await = next;
        Ok(())
    }

    async fn snapshot(&self) -> Result<CacheSnapshot> {
        Ok(self.snapshot.read().await.clone())
    }
}
