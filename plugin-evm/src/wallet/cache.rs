//! Two-tier balance cache.
//!
//! Fast path is an in-memory map with a seconds-scale TTL; behind it sits
//! the host's durable [`CacheManager`], written through on every store
//! and used to repopulate the in-memory tier after a restart. Entries
//! expire purely by TTL and are never invalidated explicitly. Durable
//! backend failures are logged and treated as misses — this cache only
//! ever fronts display data.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use tokio::sync::Mutex;
use tracing::warn;

use crate::runtime::CacheManager;

struct MemEntry {
    value: String,
    expires_at: Instant,
}

/// TTL-expiring cache with an in-memory tier and a durable tier.
pub struct BalanceCache {
    ttl: Duration,
    namespace: String,
    mem: Mutex<HashMap<String, MemEntry>>,
    store: Arc<dyn CacheManager>,
}

impl std::fmt::Debug for BalanceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceCache")
            .field("ttl", &self.ttl)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl BalanceCache {
    /// Create a cache over the given durable backend.
    ///
    /// `namespace` prefixes every durable key (e.g. `"evm/wallet"`); the
    /// TTL applies to both tiers.
    #[must_use]
    pub fn new(store: Arc<dyn CacheManager>, namespace: impl Into<String>, ttl: Duration) -> Self {
        Self {
            ttl,
            namespace: namespace.into(),
            mem: Mutex::new(HashMap::new()),
            store,
        }
    }

    fn durable_key(&self, key: &str) -> String {
        format!("{}/{key}", self.namespace)
    }

    async fn mem_get(&self, key: &str) -> Option<String> {
        let mut mem = self.mem.lock().await;
        match mem.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                mem.remove(key);
                None
            }
            None => None,
        }
    }

    async fn mem_set(&self, key: &str, value: &str) {
        let mut mem = self.mem.lock().await;
        mem.insert(
            key.to_string(),
            MemEntry {
                value: value.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Read a value: in-memory tier first, then the durable tier.
    ///
    /// A durable hit repopulates the in-memory tier.
    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.mem_get(key).await {
            return Some(value);
        }

        match self.store.get(&self.durable_key(key)).await {
            Ok(Some(value)) => {
                self.mem_set(key, &value).await;
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "durable cache read failed");
                None
            }
        }
    }

    /// Write a value through both tiers.
    pub async fn set(&self, key: &str, value: &str) {
        self.mem_set(key, value).await;

        let expires_at = SystemTime::now() + self.ttl;
        if let Err(e) = self
            .store
            .set(&self.durable_key(key), value, expires_at)
            .await
        {
            warn!(key, error = %e, "durable cache write failed");
        }
    }
}
