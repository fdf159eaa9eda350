//! Synthetic key streams for measurement runs.
//!
//! A workload is a pair of shuffled IPv4 key lists, one to insert and one to
//! query. Most keys are random and appear once. A configurable share of each
//! list is made of a small set of heavy hitters that appear many times in
//! both lists.

use std::net::Ipv4Addr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Errors that can occur while generating a workload.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum WorkloadError {
    /// The repeated share is not a percentage
    #[error("repeat_percent must be between 0 and 100, got {0}")]
    InvalidRepeatPercent(u8),

    /// The heavy-hitter share of repeated keys is not in (0, 1]
    #[error("heavy_hitter_fraction must be in (0, 1], got {0}")]
    InvalidHeavyHitterFraction(f64),
}

/// Shape of a generated workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Length of each list
    pub num_keys: usize,

    /// Percentage of each list taken by repeated heavy-hitter keys
    pub repeat_percent: u8,

    /// Distinct heavy hitters as a fraction of the repeated keys
    pub heavy_hitter_fraction: f64,

    /// Seed for reproducible runs; random when unset
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_keys: 100_000,
            repeat_percent: 20,
            heavy_hitter_fraction: 0.05,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Check the percentages.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkloadError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if self.repeat_percent > 100 {
            return Err(WorkloadError::InvalidRepeatPercent(self.repeat_percent));
        }
        if !(self.heavy_hitter_fraction > 0.0 && self.heavy_hitter_fraction <= 1.0) {
            return Err(WorkloadError::InvalidHeavyHitterFraction(
                self.heavy_hitter_fraction,
            ));
        }
        Ok(())
    }
}

/// Keys to insert and keys to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    /// Keys fed to `add_new`
    pub insert: Vec<String>,
    /// Keys fed to `should_exists` / `is_exists`
    pub query: Vec<String>,
}

/// Generate a workload.
///
/// Each list gets `num_keys * (1 - r)` random keys (independently drawn for
/// the two lists), then `num_keys * r` repeated keys: `num_keys * r * fraction`
/// distinct heavy hitters, each appended the same number of times to both
/// lists. Both lists are then shuffled.
///
/// # Errors
///
/// Returns a [`WorkloadError`] when the configuration is invalid.
pub fn generate_workload(config: &WorkloadConfig) -> Result<Workload, WorkloadError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let repeat = f64::from(config.repeat_percent) / 100.0;
    let num_random = (config.num_keys as f64 * (1.0 - repeat)) as usize;
    let mut insert: Vec<String> = (0..num_random).map(|_| random_ip(&mut rng)).collect();
    let mut query: Vec<String> = (0..num_random).map(|_| random_ip(&mut rng)).collect();

    let num_repeated = (config.num_keys as f64 * repeat) as usize;
    let num_heavy_hitters = (num_repeated as f64 * config.heavy_hitter_fraction) as usize;
    if num_heavy_hitters > 0 {
        let copies = num_repeated / num_heavy_hitters;
        for _ in 0..num_heavy_hitters {
            let heavy_hitter = random_ip(&mut rng);
            for _ in 0..copies {
                insert.push(heavy_hitter.clone());
                query.push(heavy_hitter.clone());
            }
        }
    }

    insert.shuffle(&mut rng);
    query.shuffle(&mut rng);

    tracing::debug!(
        insert = insert.len(),
        query = query.len(),
        heavy_hitters = num_heavy_hitters,
        "Generated workload"
    );

    Ok(Workload { insert, query })
}

fn random_ip(rng: &mut impl Rng) -> String {
    Ipv4Addr::from(rng.gen_range(1..=u32::MAX)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(num_keys: usize, repeat_percent: u8) -> WorkloadConfig {
        WorkloadConfig {
            num_keys,
            repeat_percent,
            heavy_hitter_fraction: 0.05,
            seed: Some(7),
        }
    }

    #[test]
    fn test_sizes_and_heavy_hitters() {
        let workload = generate_workload(&config(1_000, 20)).unwrap();

        // 800 random keys plus 10 heavy hitters repeated 20 times
        assert_eq!(workload.insert.len(), 1_000);
        assert_eq!(workload.query.len(), 1_000);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for key in &workload.insert {
            *counts.entry(key.as_str()).or_default() += 1;
        }
        let heavy: Vec<&str> = counts
            .iter()
            .filter(|(_, count)| **count >= 20)
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(heavy.len(), 10);

        for key in heavy {
            assert_eq!(workload.query.iter().filter(|k| k.as_str() == key).count(), 20);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let first = generate_workload(&config(500, 20)).unwrap();
        let second = generate_workload(&config(500, 20)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keys_are_ipv4() {
        let workload = generate_workload(&config(100, 50)).unwrap();
        for key in workload.insert.iter().chain(&workload.query) {
            assert!(key.parse::<Ipv4Addr>().is_ok(), "{key} is not an IPv4 address");
        }
    }

    #[test]
    fn test_no_repeats() {
        let workload = generate_workload(&config(200, 0)).unwrap();
        assert_eq!(workload.insert.len(), 200);
        assert_eq!(workload.query.len(), 200);
    }

    #[test]
    fn test_too_few_repeats_for_a_heavy_hitter() {
        // 10 repeated slots * 0.05 rounds down to zero heavy hitters
        let workload = generate_workload(&config(100, 10)).unwrap();
        assert_eq!(workload.insert.len(), 90);
    }

    #[test]
    fn test_invalid_percent() {
        assert_eq!(
            generate_workload(&config(10, 101)),
            Err(WorkloadError::InvalidRepeatPercent(101))
        );
    }

    #[test]
    fn test_invalid_fraction() {
        let mut cfg = config(10, 20);
        cfg.heavy_hitter_fraction = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(WorkloadError::InvalidHeavyHitterFraction(_))
        ));
    }
}
