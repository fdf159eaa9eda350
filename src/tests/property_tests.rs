//! Property-based tests of the estimator contracts.

use proptest::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::data_structures::{DataStructure, HashIndexer, RecencyOracle};
use crate::tests::test_utils::{
    ipv4_key_strategy, key_stream_strategy, small_min_cut, small_selective_bloom,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn min_cut_counters_never_decrease(keys in key_stream_strategy(32)) {
        let mut sketch = small_min_cut(16);
        let mut previous: Vec<Vec<u64>> = sketch.table().to_vec();

        for key in &keys {
            sketch.add_new(key);
            for (row, before) in sketch.table().iter().zip(&previous) {
                prop_assert!(row.iter().zip(before).all(|(now, then)| now >= then));
            }
            previous = sketch.table().to_vec();
        }
    }

    #[test]
    fn min_cut_never_underestimates(keys in key_stream_strategy(16)) {
        let mut sketch = small_min_cut(8);
        let mut counts: HashMap<&str, u64> = HashMap::new();

        for key in &keys {
            sketch.add_new(key);
            *counts.entry(key.as_str()).or_default() += 1;
        }
        for (key, count) in counts {
            prop_assert!(sketch.estimate(key) >= count, "{} underestimated", key);
        }
    }

    #[test]
    fn bloom_counters_never_decrease(keys in key_stream_strategy(32)) {
        let mut filter = small_selective_bloom(16, 8);
        let mut previous = filter.counters().to_vec();

        for key in &keys {
            filter.add_new(key);
            prop_assert!(filter.counters().iter().zip(&previous).all(|(now, then)| now >= then));
            previous = filter.counters().to_vec();
        }
    }

    #[test]
    fn bloom_zero_counter_means_negative(
        keys in key_stream_strategy(64),
        probe in ipv4_key_strategy(),
    ) {
        let mut filter = small_selective_bloom(32, 16);
        for key in &keys {
            filter.add_new(key);
        }

        let width = NonZeroUsize::new(filter.config().bf_size).unwrap();
        let has_zero = filter
            .core()
            .indices(&probe, width)
            .into_iter()
            .any(|idx| filter.counters()[idx] == 0);
        if has_zero {
            prop_assert!(!filter.should_exists(&probe));
        }
    }

    #[test]
    fn admission_cap_freezes_counters(keys in key_stream_strategy(64), max_n in 1usize..8) {
        let mut filter = small_selective_bloom(64, max_n);
        let mut frozen: Option<Vec<u64>> = None;

        for key in &keys {
            filter.add_new(key);
            prop_assert!(filter.admitted() <= max_n);
            if let Some(snapshot) = &frozen {
                prop_assert_eq!(filter.counters(), snapshot.as_slice());
                continue;
            }
            if filter.is_full() {
                frozen = Some(filter.counters().to_vec());
            }
        }
    }

    #[test]
    fn oracle_keeps_the_most_recent_window(capacity in 1usize..32) {
        let mut oracle = RecencyOracle::new(capacity).unwrap();
        let keys: Vec<String> = (0..=capacity).map(|i| format!("192.168.{}.{}", i / 256, i % 256)).collect();

        for key in &keys {
            oracle.put(key);
            prop_assert!(oracle.len() <= capacity);
        }

        prop_assert!(!oracle.exists(&keys[0]));
        for key in &keys[1..] {
            prop_assert!(oracle.exists(key));
        }
    }

    #[test]
    fn hash_indices_are_deterministic(
        key in ipv4_key_strategy(),
        k in 1usize..40,
        range in 1usize..100_000,
    ) {
        let range = NonZeroUsize::new(range).unwrap();
        let first = HashIndexer::new(k).unwrap();
        let second = HashIndexer::new(k).unwrap();

        let indices = first.indices(&key, range);
        prop_assert_eq!(indices.len(), k);
        prop_assert!(indices.iter().all(|&idx| idx < range.get()));
        prop_assert_eq!(&indices, &first.indices(&key, range));
        prop_assert_eq!(&indices, &second.indices(&key, range));
    }

    #[test]
    fn queries_do_not_mutate(keys in key_stream_strategy(16), probe in ipv4_key_strategy()) {
        let mut sketch = small_min_cut(8);
        let mut filter = small_selective_bloom(8, 4);
        for key in &keys {
            sketch.add_new(key);
            filter.add_new(key);
        }

        let table = sketch.table().to_vec();
        let counters = filter.counters().to_vec();
        let oldest = filter.core().cache().oldest().map(str::to_owned);

        let _ = sketch.should_exists(&probe);
        let _ = sketch.is_exists(&probe);
        let _ = filter.should_exists(&probe);
        let _ = filter.is_exists(&keys[0]);

        prop_assert_eq!(sketch.table(), table.as_slice());
        prop_assert_eq!(filter.counters(), counters.as_slice());
        prop_assert_eq!(filter.core().cache().oldest().map(str::to_owned), oldest);
    }
}
