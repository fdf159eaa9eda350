// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hashing, recency window and observation shared by every estimator.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::data_structures::error::SketchResult;
use crate::data_structures::hash::HashIndexer;
use crate::data_structures::observer::{SketchEvent, SketchObserver};
use crate::data_structures::recency_oracle::RecencyOracle;

/// Component embedded by each [`DataStructure`](super::DataStructure).
///
/// Owns the multi-hash indexer, a private recency window (`cache`) and the
/// optional observer.
pub struct SketchCore {
    indexer: HashIndexer,
    cache: RecencyOracle,
    observer: Option<Arc<dyn SketchObserver>>,
}

impl SketchCore {
    /// Build the shared component.
    ///
    /// # Errors
    ///
    /// Fails when `num_hash_functions` or `cache_size` is 0.
    pub fn new(num_hash_functions: usize, cache_size: usize) -> SketchResult<Self> {
        Ok(Self {
            indexer: HashIndexer::new(num_hash_functions)?,
            cache: RecencyOracle::new(cache_size)?,
            observer: None,
        })
    }

    /// Attach an observer that receives every subsequent event.
    pub fn set_observer(&mut self, observer: Arc<dyn SketchObserver>) {
        self.observer = Some(observer);
    }

    /// Number of hash functions (`k`).
    pub fn num_hash_functions(&self) -> usize {
        self.indexer.num_hashes()
    }

    /// The recency window.
    pub fn cache(&self) -> &RecencyOracle {
        &self.cache
    }

    /// Refresh `key` in the recency window.
    pub fn remember(&mut self, key: &str) {
        if let Some(evicted) = self.cache.put(key) {
            self.notify(|| SketchEvent::Evicted { key: evicted });
        }
    }

    /// Recency-window membership of `key`.
    pub fn is_exists(&self, key: &str) -> bool {
        self.cache.exists(key)
    }

    /// The `k` hashed positions of `key` in `[0, range)`.
    pub fn indices(&self, key: &str, range: NonZeroUsize) -> Vec<usize> {
        self.indexer.indices(key, range)
    }

    /// Deliver an event to the observer. The event is only built when one is attached.
    pub fn notify(&self, event: impl FnOnce() -> SketchEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event());
        }
    }
}

impl std::fmt::Debug for SketchCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchCore")
            .field("indexer", &self.indexer)
            .field("cache", &self.cache)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::observer::MockSketchObserver;

    #[test]
    fn test_remember_and_exists() {
        let mut core = SketchCore::new(3, 2).unwrap();
        core.remember("a");
        core.remember("b");
        core.remember("c");

        assert!(!core.is_exists("a"));
        assert!(core.is_exists("b"));
        assert!(core.is_exists("c"));
        assert_eq!(core.cache().len(), 2);
        assert_eq!(core.num_hash_functions(), 3);
    }

    #[test]
    fn test_eviction_is_reported() {
        let mut mock = MockSketchObserver::new();
        mock.expect_on_event()
            .withf(|event| *event == SketchEvent::Evicted { key: "a".to_string() })
            .times(1)
            .return_const(());

        let mut core = SketchCore::new(1, 1).unwrap();
        core.set_observer(Arc::new(mock));
        core.remember("a");
        core.remember("a");
        core.remember("b");
    }

    #[test]
    fn test_notify_without_observer_skips_event() {
        let core = SketchCore::new(1, 1).unwrap();
        core.notify(|| unreachable!("event must not be built without an observer"));
    }
}
