use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default freshness window for cached upstream responses
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Most recent upstream response for one request URL
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// In-memory cache of upstream responses keyed by full request URL
///
/// Entries are never evicted; a stale entry is reported as absent and replaced
/// wholesale by the next fetch. Clones share the same map. The request queue
/// runner is the only writer.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the cached payload for `key` if it is still fresh
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if entry.is_fresh(self.ttl, Instant::now()) {
            tracing::debug!(url = %key, "Cache hit");
            Some(entry.payload.clone())
        } else {
            tracing::debug!(url = %key, "Cache entry expired");
            None
        }
    }

    /// Stores `payload` as the latest response for `key`
    pub async fn put(&self, key: &str, payload: Value) {
        let entry = CacheEntry {
            payload,
            fetched_at: Instant::now(),
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
