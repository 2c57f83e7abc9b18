//! Per-run memoisation of category variable sets.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::application::variables::VariableComposer;
use crate::domain::{Category, ServiceConfig, SharedVariableSet, build_category};

/// Shared variable cache for one generation run.
///
/// Each category is built at most once, on first request, and the same
/// `Arc` is handed to every later caller. The pool has no eviction: it lives
/// exactly as long as the run that created it.
///
/// Readers take the shared lock; a miss upgrades to the exclusive lock and
/// re-checks before building, so concurrent first requests for the same
/// category still build it once.
#[derive(Debug)]
pub struct VariablePool {
    config: ServiceConfig,
    sets: RwLock<HashMap<Category, Arc<SharedVariableSet>>>,
    builds: AtomicUsize,
}

impl VariablePool {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            sets: RwLock::new(HashMap::with_capacity(Category::ALL.len())),
            builds: AtomicUsize::new(0),
        }
    }

    /// The service description this pool derives from.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The cached set for `category`, building it on first access.
    pub fn get(&self, category: Category) -> Arc<SharedVariableSet> {
        // A poisoned lock still guards a consistent map: inserts happen after
        // the (infallible) build completes.
        {
            let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(set) = sets.get(&category) {
                return Arc::clone(set);
            }
        }

        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = sets.get(&category) {
            trace!(%category, "built by a concurrent caller");
            return Arc::clone(set);
        }

        let values = build_category(category, &self.config);
        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!(%category, keys = values.len(), "Built category variables");

        let set = Arc::new(SharedVariableSet::new(category, values));
        sets.insert(category, Arc::clone(&set));
        set
    }

    /// How many category sets have been built so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Start composing variables for one artifact.
    pub fn composer(&self) -> VariableComposer<'_> {
        VariableComposer::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_gets_return_the_same_instance() {
        let pool = VariablePool::new(ServiceConfig::named("svc"));
        for category in Category::ALL {
            let first = pool.get(category);
            let second = pool.get(category);
            assert!(Arc::ptr_eq(&first, &second), "{category}");
            assert_eq!(first.category(), category);
        }
        assert_eq!(pool.builds(), Category::ALL.len());
    }

    #[test]
    fn categories_are_built_lazily() {
        let pool = VariablePool::new(ServiceConfig::named("svc"));
        assert_eq!(pool.builds(), 0);
        pool.get(Category::Build);
        assert_eq!(pool.builds(), 1);
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        let pool = VariablePool::new(ServiceConfig::named("svc"));

        let sets: Vec<Arc<SharedVariableSet>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| pool.get(Category::Runtime)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(pool.builds(), 1);
        assert!(sets.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn separate_pools_do_not_share() {
        let a = VariablePool::new(ServiceConfig::named("a"));
        let b = VariablePool::new(ServiceConfig::named("b"));
        assert!(!Arc::ptr_eq(&a.get(Category::Common), &b.get(Category::Common)));
    }
}
