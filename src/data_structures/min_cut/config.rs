// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Min-Cut sketch.

use serde::{Deserialize, Serialize};

use crate::data_structures::error::{SketchError, SketchResult};

/// How the sketch tracks the number of distinct keys it has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistinctCounting {
    /// Keep every distinct key in a hash set. Exact, unbounded memory.
    Exact,
    /// HyperLogLog estimate. Bounded memory, about `1.04 / sqrt(2^p)` relative error.
    HyperLogLog,
}

/// Configuration for the Min-Cut sketch.
///
/// The table is `num_hash_functions` rows by `num_buckets` columns. A key is
/// reported as a heavy hitter when its minimum counter reaches the current
/// load ratio `distinct_keys / elements_to_save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinCutConfig {
    /// Target number of heavy hitters the table is sized for
    pub elements_to_save: usize,

    /// Table width
    pub num_buckets: usize,

    /// Table height; one seeded hash function per row
    pub num_hash_functions: usize,

    /// Capacity of the recency window
    pub cache_size: usize,

    /// Distinct-key tracking strategy for the load ratio
    pub distinct_counting: DistinctCounting,

    /// HyperLogLog precision (4 to 18), used with [`DistinctCounting::HyperLogLog`]
    pub hll_precision: u8,
}

impl MinCutConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - elements_to_save: 350
    /// - num_buckets: 350
    /// - num_hash_functions: 30
    /// - cache_size: 5,000
    /// - distinct_counting: Exact
    /// - hll_precision: 14
    pub fn new() -> Self {
        Self {
            elements_to_save: 350,
            num_buckets: 350,
            num_hash_functions: 30,
            cache_size: 5_000,
            distinct_counting: DistinctCounting::Exact,
            hll_precision: 14,
        }
    }

    /// Set the target number of heavy hitters.
    pub fn with_elements_to_save(mut self, elements_to_save: usize) -> Self {
        self.elements_to_save = elements_to_save;
        self
    }

    /// Set the table width.
    pub fn with_num_buckets(mut self, num_buckets: usize) -> Self {
        self.num_buckets = num_buckets;
        self
    }

    /// Set the number of hash functions (table rows).
    pub fn with_hash_functions(mut self, num_hash_functions: usize) -> Self {
        self.num_hash_functions = num_hash_functions;
        self
    }

    /// Set the recency window capacity.
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Choose the distinct-key tracking strategy.
    pub fn with_distinct_counting(mut self, distinct_counting: DistinctCounting) -> Self {
        self.distinct_counting = distinct_counting;
        self
    }

    /// Set the HyperLogLog precision.
    pub fn with_hll_precision(mut self, precision: u8) -> Self {
        self.hll_precision = precision;
        self
    }

    /// Check that every size and count is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidConfiguration`] for a zero size or count,
    /// or a HyperLogLog precision outside 4 to 18.
    pub fn validate(&self) -> SketchResult<()> {
        if self.elements_to_save == 0 {
            return Err(SketchError::not_positive("elements_to_save"));
        }
        if self.num_buckets == 0 {
            return Err(SketchError::not_positive("num_buckets"));
        }
        if self.num_hash_functions == 0 {
            return Err(SketchError::not_positive("num_hash_functions"));
        }
        if self.cache_size == 0 {
            return Err(SketchError::not_positive("cache_size"));
        }
        if self.distinct_counting == DistinctCounting::HyperLogLog
            && !(4..=18).contains(&self.hll_precision)
        {
            return Err(SketchError::InvalidConfiguration(format!(
                "hll_precision must be between 4 and 18, got {}",
                self.hll_precision
            )));
        }
        Ok(())
    }
}

impl Default for MinCutConfig {
    fn default() -> Self {
        Self::new()
    }
}
