// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the selective counting Bloom filter.

use serde::{Deserialize, Serialize};

use crate::data_structures::error::{SketchError, SketchResult};

/// Default false-positive tolerance knob.
pub const DEFAULT_ALPHA: f64 = 100.0;

/// Which fill level the admission bound is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundPolicy {
    /// Use `max_n`. The bound is fixed after the first admission.
    Static,
    /// Use the current admitted count `n`, so the bound tightens as the filter fills.
    FillAdjusted,
}

/// Configuration for the selective counting Bloom filter.
///
/// Sizes default to the reference measurement setup: 30 hash functions over
/// 33,280 counters, at most 2,300 admissions, and a prior normalized by
/// 1,600,000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectiveBloomConfig {
    /// Number of hash functions (`k`)
    pub num_hash_functions: usize,

    /// Capacity of the recency window
    pub cache_size: usize,

    /// Number of Bloom counters
    pub bf_size: usize,

    /// Maximum number of keys ever admitted into the counters
    pub max_n: usize,

    /// Normalization constant for the prior estimate
    pub memory_size: usize,

    /// Positive answers need `posterior >= 1 / (1 + alpha)`; larger is stricter
    pub alpha: f64,

    /// How the admission bound is derived
    pub bound_policy: BoundPolicy,
}

impl SelectiveBloomConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self {
            num_hash_functions: 30,
            cache_size: 5_000,
            bf_size: 33_280,
            max_n: 2_300,
            memory_size: 1_600_000,
            alpha: DEFAULT_ALPHA,
            bound_policy: BoundPolicy::Static,
        }
    }

    /// Set the number of hash functions.
    pub fn with_hash_functions(mut self, num_hash_functions: usize) -> Self {
        self.num_hash_functions = num_hash_functions;
        self
    }

    /// Set the recency window capacity.
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Set the number of Bloom counters.
    pub fn with_bf_size(mut self, bf_size: usize) -> Self {
        self.bf_size = bf_size;
        self
    }

    /// Set the admission cap.
    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = max_n;
        self
    }

    /// Set the prior normalization constant.
    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    /// Set the false-positive tolerance knob.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Choose how the admission bound is derived.
    pub fn with_bound_policy(mut self, bound_policy: BoundPolicy) -> Self {
        self.bound_policy = bound_policy;
        self
    }

    /// The posterior a query must reach to be answered positively.
    pub fn acceptance_threshold(&self) -> f64 {
        1.0 / (1.0 + self.alpha)
    }

    /// Check that every size and count is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidConfiguration`] for a zero size or count,
    /// or an `alpha` that is not a positive finite number.
    pub fn validate(&self) -> SketchResult<()> {
        if self.num_hash_functions == 0 {
            return Err(SketchError::not_positive("num_hash_functions"));
        }
        if self.cache_size == 0 {
            return Err(SketchError::not_positive("cache_size"));
        }
        if self.bf_size == 0 {
            return Err(SketchError::not_positive("bf_size"));
        }
        if self.max_n == 0 {
            return Err(SketchError::not_positive("max_n"));
        }
        if self.memory_size == 0 {
            return Err(SketchError::not_positive("memory_size"));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(SketchError::InvalidConfiguration(format!(
                "alpha must be a positive finite number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

impl Default for SelectiveBloomConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectiveBloomConfig::default();
        assert_eq!(config.num_hash_functions, 30);
        assert_eq!(config.cache_size, 5_000);
        assert_eq!(config.bf_size, 33_280);
        assert_eq!(config.max_n, 2_300);
        assert_eq!(config.memory_size, 1_600_000);
        assert_eq!(config.alpha, DEFAULT_ALPHA);
        assert_eq!(config.bound_policy, BoundPolicy::Static);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_acceptance_threshold() {
        let config = SelectiveBloomConfig::new().with_alpha(3.0);
        assert!((config.acceptance_threshold() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_alpha() {
        for alpha in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SelectiveBloomConfig::new().with_alpha(alpha);
            assert!(config.validate().is_err(), "alpha {alpha} should be rejected");
        }
    }

    #[test]
    fn test_zero_memory_size_rejected() {
        let config = SelectiveBloomConfig::new().with_memory_size(0);
        assert_eq!(
            config.validate(),
            Err(SketchError::not_positive("memory_size"))
        );
    }

    #[test]
    fn test_bound_policy_serde_names() {
        let json = serde_json::to_string(&BoundPolicy::FillAdjusted).unwrap();
        assert_eq!(json, "\"fill_adjusted\"");
        let policy: BoundPolicy = serde_json::from_str("\"static\"").unwrap();
        assert_eq!(policy, BoundPolicy::Static);
    }
}
