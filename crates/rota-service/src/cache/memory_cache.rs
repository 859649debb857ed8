//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use rota_core::RotaResult;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default bound on stored entries.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

struct Entry {
    value: String,
    /// `None` when the TTL is too large to represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Bounded in-process key-value store with per-entry expiry.
///
/// Expired entries are dropped on read and pruned on every write. When the
/// store is full, the entry closest to expiry is evicted.
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
}

impl Default for InMemoryCacheService {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl InMemoryCacheService {
    /// Creates an empty cache with the default bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding at most `max_entries` values.
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, expired ones included until pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn get_raw(&self, key: &str) -> RotaResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            debug!("Dropped expired key '{}'", key);
        }
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RotaResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write();

        entries.retain(|_, entry| !entry.is_expired(now));

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let soonest = entries
                .iter()
                .min_by_key(|(_, entry)| (entry.expires_at.is_none(), entry.expires_at))
                .map(|(k, _)| k.clone());
            if let Some(evicted) = soonest {
                entries.remove(&evicted);
                debug!("Evicted key '{}' to stay within {} entries", evicted, self.max_entries);
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now.checked_add(ttl),
            },
        );
        debug!("Stored key '{}' in memory", key);
        Ok(())
    }

    async fn ping(&self) -> RotaResult<()> {
        Ok(())
    }
}
