//! Heavy Hitters Library
//!
//! Bounded-memory detection of keys that recur within a sliding recency
//! window. Two estimators are provided behind one [`DataStructure`]
//! interface:
//!
//! - [`MinCut`], a count-min style frequency sketch compared against the
//!   average load per key.
//! - [`SelectiveCountingBloomFilter`], a counting Bloom filter that admits
//!   keys by a prior estimate and answers queries by a posterior probability.
//!
//! Each estimator keeps its own [`RecencyOracle`], an LRU window that is the
//! ground truth its answers are measured against. The [`harness`] module
//! generates synthetic IPv4 workloads and tabulates the confusion matrix.
//!
//! # Architecture
//!
//! - Strict component boundaries: structures own their state and know nothing
//!   about the harness
//! - Dependency injection for observability through [`SketchObserver`]
//! - Construction is fallible and validated, per-call operations are total
//!
//! [`DataStructure`]: data_structures::DataStructure
//! [`MinCut`]: data_structures::MinCut
//! [`SelectiveCountingBloomFilter`]: data_structures::SelectiveCountingBloomFilter
//! [`RecencyOracle`]: data_structures::RecencyOracle
//! [`SketchObserver`]: data_structures::SketchObserver

pub mod config;
pub mod data_structures;
pub mod error;
pub mod harness;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the heavy-hitter toolkit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
