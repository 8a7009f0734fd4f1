//! # Goal Views
//!
//! Read-through cache for the summary and pending-goals regions.
//!
//! A region is fetched when it is missing or stale and served from memory
//! otherwise. [`ViewCache`] is the invalidation target handed to the intake
//! workflow; clones share the same storage.

use orbit_core::{CacheInvalidator, QueryCache, QueryKey, cache::CacheStats};
use orbit_sdk::{OrbitClient, PendingGoal, Summary};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

// =============================================================================
// SOURCE SEAM
// =============================================================================

/// Where the views come from.
pub trait ViewSource {
    type Error: std::error::Error + 'static;

    fn fetch_summary(&self) -> impl Future<Output = Result<Summary, Self::Error>>;

    fn fetch_pending_goals(&self) -> impl Future<Output = Result<Vec<PendingGoal>, Self::Error>>;
}

impl ViewSource for OrbitClient {
    type Error = orbit_sdk::Error;

    async fn fetch_summary(&self) -> Result<Summary, Self::Error> {
        self.summary().await
    }

    async fn fetch_pending_goals(&self) -> Result<Vec<PendingGoal>, Self::Error> {
        self.pending_goals().await
    }
}

// =============================================================================
// VIEW CACHE
// =============================================================================

/// A cached region value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedView {
    Summary(Summary),
    PendingGoals(Vec<PendingGoal>),
}

/// Shared query cache for the goal views.
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    inner: Arc<Mutex<QueryCache<CachedView>>>,
}

impl ViewCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueryCache<CachedView>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A fresh value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<CachedView> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: QueryKey, view: CachedView) {
        self.lock().insert(key, view);
    }

    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.lock().is_stale(key)
    }

    #[must_use]
    pub fn invalidation_count(&self, key: &QueryKey) -> u64 {
        self.lock().invalidation_count(key)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}

impl CacheInvalidator for ViewCache {
    fn invalidate(&self, key: &QueryKey) {
        let cached = self.lock().invalidate(key);
        debug!(key = %key, cached, "region invalidated");
    }
}

// =============================================================================
// GOAL VIEWS
// =============================================================================

/// Summary and pending-goals readers backed by a [`ViewCache`].
#[derive(Debug, Clone)]
pub struct GoalViews<S> {
    source: S,
    cache: ViewCache,
}

impl<S: ViewSource> GoalViews<S> {
    pub fn new(source: S, cache: ViewCache) -> Self {
        Self { source, cache }
    }

    #[must_use]
    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The weekly summary, refetched when missing or stale.
    pub async fn summary(&self) -> Result<Summary, S::Error> {
        let key = QueryKey::summary();
        if let Some(CachedView::Summary(summary)) = self.cache.get(&key) {
            return Ok(summary);
        }

        debug!(key = %key, "fetching");
        let summary = self.source.fetch_summary().await?;
        self.cache.insert(key, CachedView::Summary(summary.clone()));
        Ok(summary)
    }

    /// Pending goals, refetched when missing or stale.
    pub async fn pending_goals(&self) -> Result<Vec<PendingGoal>, S::Error> {
        let key = QueryKey::pending_goals();
        if let Some(CachedView::PendingGoals(goals)) = self.cache.get(&key) {
            return Ok(goals);
        }

        debug!(key = %key, "fetching");
        let goals = self.source.fetch_pending_goals().await?;
        self.cache.insert(key, CachedView::PendingGoals(goals.clone()));
        Ok(goals)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fmt;

    #[derive(Debug)]
    struct Never;

    impl fmt::Display for Never {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("never")
        }
    }

    impl std::error::Error for Never {}

    #[derive(Debug, Default)]
    struct CountingSource {
        summary_fetches: Cell<u32>,
        pending_fetches: Cell<u32>,
    }

    impl ViewSource for CountingSource {
        type Error = Never;

        async fn fetch_summary(&self) -> Result<Summary, Self::Error> {
            let n = self.summary_fetches.get() + 1;
            self.summary_fetches.set(n);
            Ok(Summary {
                completed: n,
                total: 10,
                goals_per_day: None,
            })
        }

        async fn fetch_pending_goals(&self) -> Result<Vec<PendingGoal>, Self::Error> {
            self.pending_fetches.set(self.pending_fetches.get() + 1);
            Ok(vec![PendingGoal {
                id: "g1".to_string(),
                title: "Meditar".to_string(),
                desired_weekly_frequency: 3,
                completion_count: 0,
            }])
        }
    }

    fn views() -> GoalViews<CountingSource> {
        GoalViews::new(CountingSource::default(), ViewCache::new())
    }

    #[tokio::test]
    async fn fresh_region_is_served_from_cache() {
        let views = views();
        views.summary().await.expect("fetch");
        views.summary().await.expect("cached");

        assert_eq!(views.source().summary_fetches.get(), 1);
        assert_eq!(views.cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn invalidated_region_is_refetched() {
        let views = views();
        assert_eq!(views.summary().await.expect("fetch").completed, 1);

        views.cache().invalidate(&QueryKey::summary());
        assert!(views.cache().is_stale(&QueryKey::summary()));

        assert_eq!(views.summary().await.expect("refetch").completed, 2);
        assert!(!views.cache().is_stale(&QueryKey::summary()));
    }

    #[tokio::test]
    async fn invalidation_is_per_region() {
        let views = views();
        views.summary().await.expect("fetch");
        views.pending_goals().await.expect("fetch");

        views.cache().invalidate(&QueryKey::pending_goals());
        views.summary().await.expect("cached");
        views.pending_goals().await.expect("refetch");

        assert_eq!(views.source().summary_fetches.get(), 1);
        assert_eq!(views.source().pending_fetches.get(), 2);
    }

    #[test]
    fn clones_share_storage() {
        let cache = ViewCache::new();
        let other = cache.clone();
        cache.insert(
            QueryKey::summary(),
            CachedView::Summary(Summary {
                completed: 0,
                total: 0,
                goals_per_day: None,
            }),
        );

        other.invalidate(&QueryKey::summary());

        assert!(cache.is_stale(&QueryKey::summary()));
        assert_eq!(cache.invalidation_count(&QueryKey::summary()), 1);
    }
}
