// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Distinct-key counting for the Min-Cut load ratio.

use std::io::Cursor;

use fnv::FnvBuildHasher;
use hashbrown::HashSet;

use super::config::{DistinctCounting, MinCutConfig};

/// Seed for the HyperLogLog hash; kept apart from the table seeds `0..k`.
const HLL_SEED: u32 = 0x9747_b28c;

/// Number of distinct keys seen so far, exact or estimated.
#[derive(Debug, Clone)]
pub enum DistinctCounter {
    /// Every distinct key, stored
    Exact(HashSet<String, FnvBuildHasher>),
    /// Register-bounded estimate
    Approximate(HyperLogLog),
}

impl DistinctCounter {
    /// Build the counter selected by `config`. The config must already be validated.
    pub fn from_config(config: &MinCutConfig) -> Self {
        match config.distinct_counting {
            DistinctCounting::Exact => Self::Exact(HashSet::default()),
            DistinctCounting::HyperLogLog => Self::Approximate(HyperLogLog::new(config.hll_precision)),
        }
    }

    /// Record a key. Repeated keys do not change the count.
    pub fn insert(&mut self, key: &str) {
        match self {
            Self::Exact(keys) => {
                if !keys.contains(key) {
                    keys.insert(key.to_owned());
                }
            }
            Self::Approximate(hll) => hll.insert(key),
        }
    }

    /// Number of distinct keys recorded.
    pub fn estimate(&self) -> f64 {
        match self {
            Self::Exact(keys) => keys.len() as f64,
            Self::Approximate(hll) => hll.estimate(),
        }
    }
}

/// HyperLogLog cardinality estimator with linear counting for small ranges.
///
/// Memory is `2^precision` one-byte registers.
#[derive(Debug, Clone)]
pub struct HyperLogLog {
    precision: u8,
    registers: Vec<u8>,
}

impl HyperLogLog {
    /// Create an estimator with `2^precision` registers.
    ///
    /// `precision` must be between 4 and 18; [`MinCutConfig::validate`] enforces it.
    pub fn new(precision: u8) -> Self {
        debug_assert!((4..=18).contains(&precision));
        Self {
            precision,
            registers: vec![0; 1usize << precision],
        }
    }

    /// Record a key.
    pub fn insert(&mut self, key: &str) {
        // Reading from an in-memory slice cannot fail.
        let hash = murmur3::murmur3_x64_128(&mut Cursor::new(key.as_bytes()), HLL_SEED).unwrap_or(0) as u64;

        let idx = (hash >> (64 - self.precision)) as usize;
        let w = (hash << self.precision) | (1u64 << (self.precision - 1));
        let rho = w.leading_zeros() as u8 + 1;

        if rho > self.registers[idx] {
            self.registers[idx] = rho;
        }
    }

    /// Estimated number of distinct keys.
    pub fn estimate(&self) -> f64 {
        let m = self.registers.len() as f64;
        let zeros = self.registers.iter().filter(|&&r| r == 0).count();
        if zeros == self.registers.len() {
            return 0.0;
        }

        let sum: f64 = self.registers.iter().map(|&r| 2f64.powi(-(r as i32))).sum();
        let raw = self.alpha() * m * m / sum;

        // Small range: linear counting is far more accurate
        if raw <= 2.5 * m && zeros > 0 {
            return m * (m / zeros as f64).ln();
        }
        raw
    }

    fn alpha(&self) -> f64 {
        match self.registers.len() {
            16 => 0.673,
            32 => 0.697,
            64 => 0.709,
            m => 0.7213 / (1.0 + 1.079 / m as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_counter_ignores_repeats() {
        let config = MinCutConfig::new().with_distinct_counting(DistinctCounting::Exact);
        let mut counter = DistinctCounter::from_config(&config);

        for key in ["a", "b", "a", "c", "b", "a"] {
            counter.insert(key);
        }
        assert_eq!(counter.estimate(), 3.0);
    }

    #[test]
    fn test_hll_empty_is_zero() {
        let hll = HyperLogLog::new(14);
        assert_eq!(hll.estimate(), 0.0);
    }

    #[test]
    fn test_hll_small_cardinality_is_close() {
        let mut hll = HyperLogLog::new(14);
        for i in 0..5 {
            hll.insert(&format!("10.0.0.{i}"));
            hll.insert(&format!("10.0.0.{i}"));
        }
        assert!((hll.estimate() - 5.0).abs() < 0.5);
    }

    #[test]
    fn test_hll_large_cardinality_within_error() {
        let mut hll = HyperLogLog::new(14);
        let n = 100_000;
        for i in 0..n {
            hll.insert(&format!("key-{i}"));
        }
        let relative_error = (hll.estimate() - n as f64).abs() / n as f64;
        assert!(relative_error < 0.05, "relative error too high: {relative_error}");
    }
}
