// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Multi-hash indexing for the counter tables.
//!
//! Every key is mapped to `k` positions using `k` independently seeded
//! MurmurHash3 (x86, 32-bit) functions, where function `i` uses seed `i`.
//! Positions are never derived from one hash by bit-splitting or double
//! hashing, so collisions in one table row say nothing about another row.

use std::io::Cursor;
use std::num::NonZeroUsize;

use crate::data_structures::error::{SketchError, SketchResult};

/// Hash a key with MurmurHash3 x86_32 under the given seed.
pub fn murmur_hash(key: &[u8], seed: u32) -> u32 {
    // Reading from an in-memory slice cannot fail.
    murmur3::murmur3_32(&mut Cursor::new(key), seed).unwrap_or(0)
}

/// Deterministic mapping from a key to `k` indices within a bounded range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashIndexer {
    num_hashes: usize,
}

impl HashIndexer {
    /// Create an indexer backed by `num_hashes` seeded hash functions.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidConfiguration`] when `num_hashes` is 0.
    pub fn new(num_hashes: usize) -> SketchResult<Self> {
        if num_hashes == 0 {
            return Err(SketchError::not_positive("num_hash_functions"));
        }
        if u32::try_from(num_hashes).is_err() {
            return Err(SketchError::InvalidConfiguration(format!(
                "num_hash_functions must fit in a 32-bit seed, got {num_hashes}"
            )));
        }
        Ok(Self { num_hashes })
    }

    /// Number of hash functions (`k`).
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Compute the `k` indices of `key` within `[0, range)`.
    ///
    /// Index `i` is `murmur_hash(key, i) mod range`.
    pub fn indices(&self, key: &str, range: NonZeroUsize) -> Vec<usize> {
        let bytes = key.as_bytes();
        (0..self.num_hashes as u32)
            .map(|seed| murmur_hash(bytes, seed) as usize % range.get())
            .collect()
    }

    /// Like [`indices`](Self::indices), for a range that has not been validated yet.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidRange`] when `range_size` is 0.
    pub fn try_indices(&self, key: &str, range_size: usize) -> SketchResult<Vec<usize>> {
        let range = NonZeroUsize::new(range_size).ok_or(SketchError::InvalidRange(range_size))?;
        Ok(self.indices(key, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn range(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_murmur_reference_vectors() {
        assert_eq!(murmur_hash(b"", 0), 0);
        assert_eq!(murmur_hash(b"hello", 0), 613_153_351);
    }

    #[test]
    fn test_indices_count_and_bounds() {
        let indexer = HashIndexer::new(10).unwrap();
        let indices = indexer.indices("192.168.1.10", range(350));

        assert_eq!(indices.len(), 10);
        assert!(indices.iter().all(|&i| i < 350));
    }

    #[test]
    fn test_indices_are_deterministic() {
        let first = HashIndexer::new(5).unwrap();
        let second = HashIndexer::new(5).unwrap();

        let a = first.indices("10.0.0.1", range(1024));
        let b = first.indices("10.0.0.1", range(1024));
        let c = second.indices("10.0.0.1", range(1024));

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_seeds_are_independent() {
        let indexer = HashIndexer::new(8).unwrap();
        let raw: HashSet<u32> = (0..8).map(|seed| murmur_hash(b"10.0.0.1", seed)).collect();

        // Different seeds must produce different full-width hashes
        assert_eq!(raw.len(), 8);

        // And the reduced indices should show some diversity too
        let reduced: HashSet<usize> = indexer.indices("10.0.0.1", range(1 << 16)).into_iter().collect();
        assert!(reduced.len() >= 6);
    }

    #[test]
    fn test_prefix_of_larger_indexer() {
        let small = HashIndexer::new(3).unwrap();
        let large = HashIndexer::new(6).unwrap();

        let a = small.indices("key", range(97));
        let b = large.indices("key", range(97));
        assert_eq!(a[..], b[..3]);
    }

    #[test]
    fn test_invalid_range() {
        let indexer = HashIndexer::new(2).unwrap();
        assert_eq!(indexer.try_indices("key", 0), Err(SketchError::InvalidRange(0)));
        assert_eq!(indexer.try_indices("key", 1).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_zero_hash_functions_rejected() {
        assert!(matches!(
            HashIndexer::new(0),
            Err(SketchError::InvalidConfiguration(_))
        ));
    }
}
