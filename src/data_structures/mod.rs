// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Data structures for heavy-hitter detection.
//!
//! Two interchangeable estimators decide whether a key is a heavy hitter:
//! - [`MinCut`]: a count-min style table with a load-derived threshold
//! - [`SelectiveCountingBloomFilter`]: a counting Bloom filter with
//!   prior-driven admission and a posterior query rule
//!
//! Both embed a [`SketchCore`] (seeded multi-hash indexing plus a private
//! [`RecencyOracle`]) and implement [`DataStructure`]. The oracle is the
//! ground truth the estimators are scored against.
//!
//! All structures are single-writer: callers serialize access to an instance.

pub mod base;
pub mod error;
pub mod hash;
pub mod min_cut;
pub mod observer;
pub mod recency_oracle;
pub mod selective_bloom;

// Re-export common data structures
pub use base::SketchCore;
pub use error::{SketchError, SketchResult};
pub use hash::HashIndexer;
pub use min_cut::{DistinctCounting, MinCut, MinCutConfig};
pub use observer::{SketchEvent, SketchObserver, TracingObserver};
pub use recency_oracle::RecencyOracle;
pub use selective_bloom::{BoundPolicy, SelectiveBloomConfig, SelectiveCountingBloomFilter};

/// Common contract of the heavy-hitter estimators.
pub trait DataStructure {
    /// Record one occurrence of `key`.
    fn add_new(&mut self, key: &str);

    /// The structure's own verdict on whether `key` is a heavy hitter.
    fn should_exists(&self, key: &str) -> bool;

    /// Ground truth: whether `key` is inside the recency window.
    fn is_exists(&self, key: &str) -> bool {
        self.core().is_exists(key)
    }

    /// The shared hashing and recency component.
    fn core(&self) -> &SketchCore;

    /// Short identifier used in reports and events.
    fn name(&self) -> &'static str;
}
