//! In-memory shared cache
//!
//! [`LocMemCache`] is the process-local cache backend tests write to. Keys
//! live in a sharded `DashMap`, so reads never block each other.
//!
//! # Expiry
//!
//! Entries may carry a timeout. Expired entries read as absent and are
//! purged lazily: on the read that notices them, and on [`CacheBackend::len`].

use std::time::{Duration, Instant};

use dashmap::DashMap;
use sanetest_core::{CacheBackend, Value};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    #[inline]
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// Sharded in-memory cache backend
#[derive(Debug, Default)]
pub struct LocMemCache {
    entries: DashMap<String, CacheEntry>,
}

impl LocMemCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted keys of all live entries
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Whether a live entry exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }
}

impl CacheBackend for LocMemCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        None
    }

    fn set_with_timeout(&self, key: &str, value: Value, timeout: Option<Duration>) {
        let expires_at = timeout.map(|t| Instant::now() + t);
        self.entries
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }

    fn delete(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .remove(key)
            .is_some_and(|(_, entry)| !entry.is_expired(now))
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.purge_expired();
        self.entries.len()
    }
}
