// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Min-Cut sketch for heavy-hitter prediction.
//!
//! A `k × m` table of counters, one seeded hash function per row. The
//! estimate for a key is the minimum of its `k` counters, which can only
//! overestimate. A key is predicted to be a heavy hitter when that estimate
//! reaches the frequency every key would have if the distinct keys seen so
//! far were spread evenly over `elements_to_save` slots.
//!
//! # Example
//!
//! ```
//! use heavy_hitters_lib::data_structures::min_cut::{MinCut, MinCutConfig};
//! use heavy_hitters_lib::data_structures::DataStructure;
//!
//! let mut sketch = MinCut::new(MinCutConfig::default()).unwrap();
//! sketch.add_new("192.168.0.1");
//! assert!(sketch.is_exists("192.168.0.1"));
//! ```

// Module declarations
mod cardinality;
mod config;
mod sketch;

// Re-exports
pub use cardinality::{DistinctCounter, HyperLogLog};
pub use config::{DistinctCounting, MinCutConfig};
pub use sketch::MinCut;
