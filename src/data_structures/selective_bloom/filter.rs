// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the selective counting Bloom filter.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::data_structures::base::SketchCore;
use crate::data_structures::error::{SketchError, SketchResult};
use crate::data_structures::observer::{SketchEvent, SketchObserver};
use crate::data_structures::selective_bloom::config::{BoundPolicy, SelectiveBloomConfig};
use crate::data_structures::selective_bloom::posterior::{admission_bound, posterior};
use crate::data_structures::DataStructure;

/// Counting Bloom filter that chooses what to admit and how far to trust a hit.
///
/// Insertion is skipped for keys whose prior estimate (the occupied fraction
/// of the recency window over `memory_size`) is below the admission bound,
/// and for every key once `max_n` keys have been admitted. A query answers
/// positively only when the posterior probability, fusing the counter
/// product with the prior, reaches `1 / (1 + alpha)`.
///
/// # Examples
///
/// ```
/// use heavy_hitters_lib::data_structures::{
///     DataStructure, SelectiveBloomConfig, SelectiveCountingBloomFilter,
/// };
///
/// let config = SelectiveBloomConfig::new()
///     .with_hash_functions(3)
///     .with_cache_size(10)
///     .with_bf_size(1_000)
///     .with_max_n(10)
///     .with_memory_size(10);
/// let mut filter = SelectiveCountingBloomFilter::new(config).unwrap();
///
/// filter.add_new("10.0.0.1");
/// assert_eq!(filter.admitted(), 1);
/// assert!(filter.should_exists("10.0.0.1"));
/// ```
#[derive(Debug)]
pub struct SelectiveCountingBloomFilter {
    core: SketchCore,
    config: SelectiveBloomConfig,
    width: NonZeroUsize,
    counters: Vec<u64>,
    /// Keys admitted into `counters`, never above `max_n`
    n: usize,
    bound: f64,
    /// Calls to `add_new`, admitted or not
    inserted: u64,
}

impl SelectiveCountingBloomFilter {
    /// Create a filter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidConfiguration`] when the configuration is invalid.
    pub fn new(config: SelectiveBloomConfig) -> SketchResult<Self> {
        config.validate()?;
        let width =
            NonZeroUsize::new(config.bf_size).ok_or_else(|| SketchError::not_positive("bf_size"))?;
        let core = SketchCore::new(config.num_hash_functions, config.cache_size)?;

        tracing::debug!(
            num_hash_functions = config.num_hash_functions,
            cache_size = config.cache_size,
            bf_size = config.bf_size,
            max_n = config.max_n,
            memory_size = config.memory_size,
            alpha = config.alpha,
            bound_policy = ?config.bound_policy,
            "Created selective counting Bloom filter"
        );

        Ok(Self {
            core,
            counters: vec![0; config.bf_size],
            width,
            n: 0,
            bound: 0.0,
            inserted: 0,
            config,
        })
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: Arc<dyn SketchObserver>) -> Self {
        self.core.set_observer(observer);
        self
    }

    /// Fraction of `memory_size` occupied by the recency window.
    pub fn prior_estimate(&self) -> f64 {
        self.core.cache().len() as f64 / self.config.memory_size as f64
    }

    /// Current admission bound. Zero until the first admission.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Number of keys admitted into the counters.
    pub fn admitted(&self) -> usize {
        self.n
    }

    /// Number of `add_new` calls, admitted or not.
    pub fn inserted(&self) -> u64 {
        self.inserted
    }

    /// Whether the admission cap has been reached.
    pub fn is_full(&self) -> bool {
        self.n == self.config.max_n
    }

    /// The Bloom counters.
    pub fn counters(&self) -> &[u64] {
        &self.counters
    }

    /// Posterior probability that `key` was admitted; 0 when any of its counters is 0.
    pub fn posterior(&self, key: &str) -> f64 {
        let counters = self.key_counters(key);
        if counters.contains(&0) {
            return 0.0;
        }
        posterior(self.config.bf_size, self.n, &counters, self.prior_estimate())
    }

    /// Get the configuration of this filter.
    pub fn config(&self) -> &SelectiveBloomConfig {
        &self.config
    }

    fn key_counters(&self, key: &str) -> Vec<u64> {
        self.core
            .indices(key, self.width)
            .into_iter()
            .map(|idx| self.counters[idx])
            .collect()
    }

    fn update_bound(&mut self) {
        self.bound = if self.n == 0 {
            0.0
        } else {
            let fill = match self.config.bound_policy {
                BoundPolicy::Static => self.config.max_n,
                BoundPolicy::FillAdjusted => self.n,
            };
            admission_bound(self.config.alpha, self.config.bf_size, fill)
        };
    }
}

impl DataStructure for SelectiveCountingBloomFilter {
    fn add_new(&mut self, key: &str) {
        self.inserted += 1;
        self.core.remember(key);

        let prior = self.prior_estimate();
        if prior < self.bound {
            let bound = self.bound;
            self.core.notify(|| SketchEvent::SkippedLowPrior {
                key: key.to_owned(),
                prior,
                bound,
            });
            return;
        }
        if self.is_full() {
            let max_n = self.config.max_n;
            self.core.notify(|| SketchEvent::SkippedAtCapacity {
                key: key.to_owned(),
                max_n,
            });
            return;
        }

        for idx in self.core.indices(key, self.width) {
            self.counters[idx] = self.counters[idx].saturating_add(1);
        }
        self.n += 1;
        self.update_bound();

        let (admitted, bound) = (self.n, self.bound);
        self.core.notify(|| SketchEvent::Admitted {
            key: key.to_owned(),
            admitted,
            bound,
        });
    }

    fn should_exists(&self, key: &str) -> bool {
        let score = self.posterior(key);
        let verdict = score >= self.config.acceptance_threshold();
        self.core.notify(|| SketchEvent::Verdict {
            structure: self.name(),
            key: key.to_owned(),
            verdict,
            score,
        });
        verdict
    }

    fn core(&self) -> &SketchCore {
        &self.core
    }

    fn name(&self) -> &'static str {
        "selective_bloom"
    }
}
