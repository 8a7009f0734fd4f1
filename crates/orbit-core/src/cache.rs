//! # Query Cache
//!
//! Named regions of fetched data ("summary", "pending-goals") that can be
//! marked stale so their readers refetch instead of trusting the stored value.
//!
//! ## Design Principles
//!
//! - All data structures use BTreeMap for deterministic ordering
//! - No floating-point arithmetic
//! - Integer-only timestamps (logical clock, not wall clock)
//!
//! Invalidation only flags an entry. Nothing is refetched here; that is the
//! reader's job on its next access.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// QUERY KEY
// =============================================================================

/// Name of a cached data region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

/// Weekly summary region.
pub const SUMMARY: &str = "summary";

/// Pending goals region.
pub const PENDING_GOALS: &str = "pending-goals";

impl QueryKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn summary() -> Self {
        Self::new(SUMMARY)
    }

    #[must_use]
    pub fn pending_goals() -> Self {
        Self::new(PENDING_GOALS)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QueryKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// INVALIDATION SEAM
// =============================================================================

/// Something that can be told a cached region is out of date.
///
/// Takes `&self`: implementors own their synchronization.
pub trait CacheInvalidator {
    /// Mark `key` stale. Fire-and-forget.
    fn invalidate(&self, key: &QueryKey);
}

// =============================================================================
// CACHE ENTRY
// =============================================================================

/// An entry in the query cache.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached value.
    pub value: V,

    /// Logical timestamp of the last write.
    pub updated_at: u64,

    /// Set by invalidation, cleared by the next write.
    pub stale: bool,
}

impl<V> CacheEntry<V> {
    fn new(value: V, timestamp: u64) -> Self {
        Self {
            value,
            updated_at: timestamp,
            stale: false,
        }
    }
}

// =============================================================================
// QUERY CACHE
// =============================================================================

/// Cache of fetched regions keyed by [`QueryKey`].
#[derive(Debug)]
pub struct QueryCache<V> {
    /// Cache storage: key -> entry.
    entries: BTreeMap<QueryKey, CacheEntry<V>>,

    /// How many times each key was invalidated, whether or not it was cached.
    invalidations: BTreeMap<QueryKey, u64>,

    /// Logical clock for timestamps (monotonic counter).
    logical_clock: u64,

    /// Statistics: total hits.
    hits: u64,

    /// Statistics: total misses (absent or stale).
    misses: u64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> QueryCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            invalidations: BTreeMap::new(),
            logical_clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.logical_clock = self.logical_clock.saturating_add(1);
        self.logical_clock
    }

    /// Get a fresh value.
    ///
    /// Stale and missing entries both count as a miss and return `None`.
    pub fn get(&mut self, key: &QueryKey) -> Option<&V> {
        match self.entries.get(key) {
            Some(entry) if !entry.stale => {
                self.hits = self.hits.saturating_add(1);
                Some(&entry.value)
            }
            _ => {
                self.misses = self.misses.saturating_add(1);
                None
            }
        }
    }

    /// Get a value regardless of staleness, without touching statistics.
    #[must_use]
    pub fn peek(&self, key: &QueryKey) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// Store a freshly fetched value. Clears any stale flag.
    pub fn insert(&mut self, key: QueryKey, value: V) {
        let timestamp = self.tick();
        self.entries.insert(key, CacheEntry::new(value, timestamp));
    }

    /// Mark a region stale.
    ///
    /// Returns `true` if an entry was present. Invalidating an uncached key
    /// is still counted.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        let count = self.invalidations.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);

        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    /// Mark every cached region stale.
    pub fn invalidate_all(&mut self) {
        let keys: Vec<QueryKey> = self.entries.keys().cloned().collect();
        for key in &keys {
            self.invalidate(key);
        }
    }

    /// Whether a cached region is stale. Missing regions are not stale.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.stale)
    }

    /// How many times `key` has been invalidated.
    #[must_use]
    pub fn invalidation_count(&self, key: &QueryKey) -> u64 {
        self.invalidations.get(key).copied().unwrap_or(0)
    }

    /// Remove a specific key from the cache.
    pub fn remove(&mut self, key: &QueryKey) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Clear the entire cache.
    pub fn clear(&mut self) {
        self.entries.clear();
        // Don't reset logical clock or stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a key exists in the cache, stale or not.
    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Get all keys in the cache (deterministic order).
    pub fn keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.entries.keys()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            stale: self.entries.values().filter(|e| e.stale).count(),
            hits: self.hits,
            misses: self.misses,
            hit_rate_percent: self.hit_rate_percent(),
        }
    }

    /// Calculate hit rate as integer percentage (0-100).
    #[must_use]
    pub fn hit_rate_percent(&self) -> u8 {
        let total = self.hits.saturating_add(self.misses);
        if total == 0 {
            0
        } else {
            ((self.hits.saturating_mul(100)) / total) as u8
        }
    }
}

// =============================================================================
// CACHE STATISTICS
// =============================================================================

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries.
    pub size: usize,

    /// Entries currently marked stale.
    pub stale: usize,

    /// Total cache hits.
    pub hits: u64,

    /// Total cache misses.
    pub misses: u64,

    /// Hit rate as integer percentage (0-100).
    pub hit_rate_percent: u8,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_insert_and_get() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::summary(), "summary");
        cache.insert(QueryKey::pending_goals(), "pending");

        assert_eq!(cache.get(&QueryKey::summary()), Some(&"summary"));
        assert_eq!(cache.get(&QueryKey::pending_goals()), Some(&"pending"));
        assert_eq!(cache.get(&QueryKey::new("other")), None);
    }

    #[test]
    fn invalidated_entry_is_a_miss() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::summary(), 1);

        assert!(cache.invalidate(&QueryKey::summary()));
        assert!(cache.is_stale(&QueryKey::summary()));
        assert_eq!(cache.get(&QueryKey::summary()), None);
        // The stale value is still inspectable
        assert_eq!(cache.peek(&QueryKey::summary()), Some(&1));
    }

    #[test]
    fn insert_clears_stale_flag() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::summary(), 1);
        cache.invalidate(&QueryKey::summary());
        cache.insert(QueryKey::summary(), 2);

        assert!(!cache.is_stale(&QueryKey::summary()));
        assert_eq!(cache.get(&QueryKey::summary()), Some(&2));
    }

    #[test]
    fn invalidating_missing_key_is_counted() {
        let mut cache = QueryCache::<u8>::new();
        assert!(!cache.invalidate(&QueryKey::pending_goals()));
        assert!(!cache.is_stale(&QueryKey::pending_goals()));
        assert_eq!(cache.invalidation_count(&QueryKey::pending_goals()), 1);
        assert_eq!(cache.invalidation_count(&QueryKey::summary()), 0);
    }

    #[test]
    fn invalidate_all_marks_everything() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::summary(), 1);
        cache.insert(QueryKey::pending_goals(), 2);

        cache.invalidate_all();

        assert_eq!(cache.stats().stale, 2);
        assert_eq!(cache.invalidation_count(&QueryKey::summary()), 1);
        assert_eq!(cache.invalidation_count(&QueryKey::pending_goals()), 1);
    }

    #[test]
    fn cache_stats() {
        let mut cache = QueryCache::new();

        cache.insert(QueryKey::summary(), "a");
        let _ = cache.get(&QueryKey::summary()); // Hit
        let _ = cache.get(&QueryKey::pending_goals()); // Miss
        let _ = cache.get(&QueryKey::summary()); // Hit
        cache.invalidate(&QueryKey::summary());
        let _ = cache.get(&QueryKey::summary()); // Miss (stale)

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hit_rate_percent, 50);
        assert_eq!(stats.stale, 1);
    }

    #[test]
    fn cache_remove_and_clear() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::summary(), "a");
        cache.insert(QueryKey::pending_goals(), "b");

        assert_eq!(cache.remove(&QueryKey::summary()), Some("a"));
        assert!(!cache.contains(&QueryKey::summary()));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn deterministic_iteration() {
        let mut cache = QueryCache::new();
        cache.insert(QueryKey::summary(), 0);
        cache.insert(QueryKey::pending_goals(), 0);
        cache.insert(QueryKey::new("alpha"), 0);

        let keys: Vec<_> = cache.keys().map(QueryKey::as_str).collect();
        assert_eq!(keys, vec!["alpha", "pending-goals", "summary"]);
    }

    #[test]
    fn key_literals() {
        assert_eq!(QueryKey::summary().as_str(), "summary");
        assert_eq!(QueryKey::pending_goals().to_string(), "pending-goals");
        assert_eq!(QueryKey::from("summary"), QueryKey::summary());
    }
}
