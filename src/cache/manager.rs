/// In-memory string-keyed cache with per-entry TTL and lazy expiry
///
/// Stale entries are only removed when a read finds them expired; there is
/// no background sweep. The map is behind a mutex so the cache can be shared
/// across tokio worker threads. No operation suspends.
use super::config::{bounded_ttl, CacheConfig};
use crate::logger::{self, LogTag};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry with expiry tracking
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        let stored_at = Instant::now();
        Self {
            value,
            stored_at,
            expires_at: stored_at + bounded_ttl(ttl),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Cache metrics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub expirations: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    metrics: CacheMetrics,
}

pub struct TtlCache<V: Clone> {
    name: &'static str,
    config: CacheConfig,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> TtlCache<V> {
    /// `name` only labels debug log lines
    pub fn new(name: &'static str, config: CacheConfig) -> Self {
        Self {
            name,
            config,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                metrics: CacheMetrics::default(),
            }),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Store a value under the default TTL, replacing any existing entry
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.config.ttl);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let mut inner = self.inner.lock();
        inner.metrics.inserts += 1;
        inner.entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Get a value if present and fresh; an expired entry is evicted on the way out
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                inner.metrics.hits += 1;
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.metrics.expirations += 1;
            logger::debug(
                LogTag::Cache,
                &format!("[{}] evicted expired entry '{}'", self.name, key),
            );
        }
        inner.metrics.misses += 1;
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.inner
            .lock()
            .entries
            .get(key)
            .map(|entry| !entry.is_expired(now))
            .unwrap_or(false)
    }

    pub fn delete(&self, key: &str) {
        self.inner.lock().entries.remove(key);
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Number of physically stored entries, including ones not yet lazily evicted
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.inner.lock().metrics.clone()
    }
}

impl<V: Clone> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("ttl", &self.config.ttl)
            .field("len", &self.len())
            .finish()
    }
}
