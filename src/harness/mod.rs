//! Measurement harness comparing the estimators on synthetic IPv4 traffic.
//!
//! The ground truth for a query is membership in the estimator's own recency
//! window; the estimate is its `should_exists` answer.

pub mod evaluation;
pub mod workload;

pub use evaluation::{run_comparison, run_trial, Comparison, Results};
pub use workload::{generate_workload, Workload, WorkloadConfig, WorkloadError};
