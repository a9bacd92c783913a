//! Bounded LRU cache with per-entry TTL
//!
//! Fronts the page pipeline, keyed by normalized URL. Expiry is checked
//! lazily on access; [`ResultCache::cleanup`] sweeps proactively and
//! [`ResultCache::start_cleanup_task`] runs that sweep on an interval.
//!
//! Each operation holds the lock for its whole read-modify-write, so the
//! recency list and the key map never disagree. The surrounding
//! check-compute-insert sequence is not atomic: two concurrent misses for
//! the same key both compute and the last `set` wins.

use lru::LruCache;
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A cached value with its bookkeeping
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: Instant,
    pub hit_count: u64,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            hit_count: 0,
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    /// Hits across live entries
    pub total_hits: u64,
}

/// Thread-safe LRU + TTL cache
#[derive(Debug)]
pub struct ResultCache<T> {
    entries: Mutex<LruCache<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> ResultCache<T> {
    /// A cache holding at most `max_size` entries (minimum 1) for `ttl` each
    #[must_use]
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Value for `key`, promoted to most recently used.
    ///
    /// An expired entry is evicted and reported absent.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock();

        if entries.peek(key)?.is_expired(self.ttl) {
            entries.pop(key);
            tracing::debug!(key = %key, "Cache entry expired");
            return None;
        }

        let entry = entries.get_mut(key)?;
        entry.hit_count += 1;
        Some(entry.data.clone())
    }

    /// Insert `value` as most recently used with a fresh timestamp.
    ///
    /// Re-setting an existing key replaces it; at capacity the least recently
    /// used entry is evicted first.
    pub fn set(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let mut entries = self.entries.lock();

        entries.pop(&key);
        if let Some((evicted, _)) = entries.push(key, CacheEntry::new(value)) {
            tracing::debug!(key = %evicted, "Cache entry evicted (capacity)");
        }
    }

    /// Whether `key` holds a live entry. Does not touch recency or hits.
    pub fn has(&self, key: &str) -> bool {
        let mut entries = self.entries.lock();

        match entries.peek(key) {
            None => false,
            Some(entry) if entry.is_expired(self.ttl) => {
                entries.pop(key);
                tracing::debug!(key = %key, "Cache entry expired");
                false
            }
            Some(_) => true,
        }
    }

    /// Remove `key`; returns whether it was present
    pub fn delete(&self, key: &str) -> bool {
        self.entries.lock().pop(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Evict every expired entry; returns how many were evicted
    pub fn cleanup(&self) -> usize {
        let mut entries = self.entries.lock();

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }

        expired.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            size: entries.len(),
            max_size: entries.cap().get(),
            total_hits: entries.iter().map(|(_, entry)| entry.hit_count).sum(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ResultCache<T> {
    /// Spawn a background task that calls [`cleanup`](Self::cleanup) every
    /// `interval`. The task runs until aborted or the runtime shuts down.
    pub fn start_cleanup_task(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = self.cleanup();
                if evicted > 0 {
                    tracing::debug!(evicted, remaining = self.len(), "Cache sweep");
                }
            }
        })
    }
}
