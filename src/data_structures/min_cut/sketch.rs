// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Min-Cut sketch.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::data_structures::base::SketchCore;
use crate::data_structures::error::{SketchError, SketchResult};
use crate::data_structures::min_cut::cardinality::DistinctCounter;
use crate::data_structures::min_cut::config::MinCutConfig;
use crate::data_structures::observer::{SketchEvent, SketchObserver};
use crate::data_structures::DataStructure;

/// Counting sketch that predicts heavy hitters against a load-derived threshold.
///
/// Every insertion increments one counter per row (no conservative update),
/// so the minimum over a key's counters never underestimates how often it
/// was inserted.
///
/// # Examples
///
/// ```
/// use heavy_hitters_lib::data_structures::{DataStructure, MinCut, MinCutConfig};
///
/// let config = MinCutConfig::new()
///     .with_elements_to_save(5)
///     .with_num_buckets(10)
///     .with_hash_functions(2);
/// let mut sketch = MinCut::new(config).unwrap();
///
/// for _ in 0..5 {
///     sketch.add_new("10.0.0.1");
/// }
/// assert!(sketch.estimate("10.0.0.1") >= 5);
/// assert!(sketch.should_exists("10.0.0.1"));
/// assert!(sketch.is_exists("10.0.0.1"));
/// ```
#[derive(Debug)]
pub struct MinCut {
    core: SketchCore,
    config: MinCutConfig,
    width: NonZeroUsize,
    /// `num_hash_functions` rows of `num_buckets` counters
    table: Vec<Vec<u64>>,
    distinct: DistinctCounter,
}

impl MinCut {
    /// Create a sketch with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidConfiguration`] when the configuration is invalid.
    pub fn new(config: MinCutConfig) -> SketchResult<Self> {
        config.validate()?;
        let width = NonZeroUsize::new(config.num_buckets)
            .ok_or_else(|| SketchError::not_positive("num_buckets"))?;
        let core = SketchCore::new(config.num_hash_functions, config.cache_size)?;

        tracing::debug!(
            elements_to_save = config.elements_to_save,
            num_buckets = config.num_buckets,
            num_hash_functions = config.num_hash_functions,
            cache_size = config.cache_size,
            distinct_counting = ?config.distinct_counting,
            "Created Min-Cut sketch"
        );

        Ok(Self {
            core,
            table: vec![vec![0; config.num_buckets]; config.num_hash_functions],
            distinct: DistinctCounter::from_config(&config),
            width,
            config,
        })
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: Arc<dyn SketchObserver>) -> Self {
        self.core.set_observer(observer);
        self
    }

    /// Minimum over the key's `k` counters.
    pub fn estimate(&self, key: &str) -> u64 {
        self.core
            .indices(key, self.width)
            .into_iter()
            .enumerate()
            .map(|(row, col)| self.table[row][col])
            .min()
            .unwrap_or(0)
    }

    /// Number of distinct keys seen so far (exact or estimated).
    pub fn distinct_keys(&self) -> f64 {
        self.distinct.estimate()
    }

    /// Current load ratio: distinct keys divided by `elements_to_save`.
    pub fn load_ratio(&self) -> f64 {
        self.distinct_keys() / self.config.elements_to_save as f64
    }

    /// The counter table, one row per hash function.
    pub fn table(&self) -> &[Vec<u64>] {
        &self.table
    }

    /// Get the configuration of this sketch.
    pub fn config(&self) -> &MinCutConfig {
        &self.config
    }
}

impl DataStructure for MinCut {
    fn add_new(&mut self, key: &str) {
        self.core.remember(key);
        self.distinct.insert(key);
        for (row, col) in self.core.indices(key, self.width).into_iter().enumerate() {
            let counter = &mut self.table[row][col];
            *counter = counter.saturating_add(1);
        }
    }

    fn should_exists(&self, key: &str) -> bool {
        let estimate = self.estimate(key);
        let verdict = estimate as f64 >= self.load_ratio();
        self.core.notify(|| SketchEvent::Verdict {
            structure: self.name(),
            key: key.to_owned(),
            verdict,
            score: estimate as f64,
        });
        verdict
    }

    fn core(&self) -> &SketchCore {
        &self.core
    }

    fn name(&self) -> &'static str {
        "min_cut"
    }
}
