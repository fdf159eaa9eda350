// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Selective counting Bloom filter.
//!
//! A counting Bloom filter with an admission policy and a Bayesian query
//! policy. Both decisions use a prior: the fraction of `memory_size`
//! currently occupied by the filter's recency window.
//!
//! # The Bloom filter paradox
//!
//! For a key whose prior probability is very low, even a positive Bloom
//! answer is more likely a collision than a real hit. Such keys are not
//! admitted at all: below the admission bound they would only add load to
//! the counters without ever producing a trustworthy positive.
//!
//! # Admission bound
//!
//! ```text
//! bound = 0                                          while n == 0
//! bound = 1 / (1 + alpha * 2^(ln 2 * bf_size / fill)) afterwards
//! ```
//!
//! Under [`BoundPolicy::Static`] (the default) `fill` is `max_n`, so the
//! bound switches once from 0 to a fixed value and then never moves. That
//! may not be what the formula intended. [`BoundPolicy::FillAdjusted`] uses
//! the current admitted count instead.
//!
//! # Example
//!
//! ```
//! use heavy_hitters_lib::data_structures::selective_bloom::{
//!     SelectiveBloomConfig, SelectiveCountingBloomFilter,
//! };
//! use heavy_hitters_lib::data_structures::DataStructure;
//!
//! let config = SelectiveBloomConfig::new().with_max_n(1).with_memory_size(1);
//! let mut filter = SelectiveCountingBloomFilter::new(config).unwrap();
//!
//! filter.add_new("10.0.0.1");
//! filter.add_new("10.0.0.2");
//! assert_eq!(filter.admitted(), 1);
//! ```

// Module declarations
mod config;
mod filter;
mod posterior;

// Re-exports
pub use config::{BoundPolicy, SelectiveBloomConfig, DEFAULT_ALPHA};
pub use filter::SelectiveCountingBloomFilter;
