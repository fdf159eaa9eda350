// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Optional observation hooks for the heavy-hitter data structures.
//!
//! Observation is not part of the functional contract. A structure without an
//! observer does no event bookkeeping at all; one with an observer reports
//! what it decided and why through [`SketchEvent`]s.

/// Something a data structure decided while inserting or answering a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    /// The recency window dropped its stalest key
    Evicted {
        /// The key that left the window
        key: String,
    },

    /// A key was written into the Bloom counters
    Admitted {
        /// The admitted key
        key: String,
        /// Admitted-key count after this admission
        admitted: usize,
        /// Admission bound after this admission
        bound: f64,
    },

    /// A key was not admitted because its prior estimate is below the bound
    SkippedLowPrior {
        /// The skipped key
        key: String,
        /// Prior estimate at insertion time
        prior: f64,
        /// Admission bound at insertion time
        bound: f64,
    },

    /// A key was not admitted because the admission cap was reached
    SkippedAtCapacity {
        /// The skipped key
        key: String,
        /// The admission cap
        max_n: usize,
    },

    /// A query was answered
    Verdict {
        /// Name of the answering structure
        structure: &'static str,
        /// The queried key
        key: String,
        /// The answer given
        verdict: bool,
        /// Min-counter estimate or posterior probability behind the answer
        score: f64,
    },
}

/// Receiver of [`SketchEvent`]s.
#[cfg_attr(test, mockall::automock)]
pub trait SketchObserver: Send + Sync {
    /// Called once per event, synchronously, from the mutating or querying call.
    fn on_event(&self, event: &SketchEvent);
}

/// Observer that forwards every event to `tracing`.
#[derive(Default, Debug, Clone, Copy)]
pub struct TracingObserver;

impl SketchObserver for TracingObserver {
    fn on_event(&self, event: &SketchEvent) {
        match event {
            SketchEvent::Evicted { key } => {
                tracing::debug!(key = %key, "Key evicted from recency window");
            }
            SketchEvent::Admitted { key, admitted, bound } => {
                tracing::debug!(key = %key, admitted, bound, "Key admitted into Bloom counters");
            }
            SketchEvent::SkippedLowPrior { key, prior, bound } => {
                tracing::debug!(key = %key, prior, bound, "Admission skipped: prior below bound");
            }
            SketchEvent::SkippedAtCapacity { key, max_n } => {
                tracing::debug!(key = %key, max_n, "Admission skipped: filter at capacity");
            }
            SketchEvent::Verdict {
                structure,
                key,
                verdict,
                score,
            } => {
                tracing::trace!(structure, key = %key, verdict, score, "Query answered");
            }
        }
    }
}
