//! Accuracy measurement against the recency-window ground truth.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::config::HeavyHittersConfig;
use crate::data_structures::{
    DataStructure, MinCut, SelectiveCountingBloomFilter, SketchObserver,
};
use crate::error::HeavyHittersResult;
use crate::harness::workload::{generate_workload, Workload};

/// Confusion matrix of one measurement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Results {
    /// Queries answered
    pub total: u64,
    /// Predicted heavy, inside the window
    pub tp: u64,
    /// Predicted heavy, outside the window
    pub fp: u64,
    /// Predicted light, inside the window
    #[serde(rename = "fn")]
    pub fn_: u64,
    /// Predicted light, outside the window
    pub tn: u64,
}

impl Results {
    /// Count one query outcome.
    pub fn record(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true, true) => self.tp += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
        self.total += 1;
    }

    /// `fp / (tn + fp)`
    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.fp, self.tn + self.fp)
    }

    /// `tp / (tp + fn)`
    pub fn true_positive_rate(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// `fn / (fn + tp)`
    pub fn false_negative_rate(&self) -> f64 {
        ratio(self.fn_, self.fn_ + self.tp)
    }

    /// `tn / (tn + fp)`
    pub fn true_negative_rate(&self) -> f64 {
        ratio(self.tn, self.tn + self.fp)
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Display for Results {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "False positive amount: {}", self.fp)?;
        writeln!(f, "False positive rate: {}", self.false_positive_rate())?;
        writeln!(f, "True positive amount: {}", self.tp)?;
        writeln!(f, "True positive rate: {}", self.true_positive_rate())?;
        writeln!(f, "False negative amount: {}", self.fn_)?;
        writeln!(f, "False negative rate: {}", self.false_negative_rate())?;
        writeln!(f, "True negative amount: {}", self.tn)?;
        writeln!(f, "True negative rate: {}", self.true_negative_rate())
    }
}

/// Insert every key of `insert`, then score every key of `query`.
pub fn run_trial(ds: &mut dyn DataStructure, insert: &[String], query: &[String]) -> Results {
    let started = Instant::now();
    for key in insert {
        ds.add_new(key);
    }

    let mut results = Results::default();
    for key in query {
        results.record(ds.should_exists(key), ds.is_exists(key));
    }

    info!(
        structure = ds.name(),
        inserted = insert.len(),
        queried = results.total,
        tp = results.tp,
        fp = results.fp,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Trial finished"
    );
    results
}

/// Results of both estimators on the same workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Min-Cut sketch results
    pub min_cut: Results,
    /// Selective counting Bloom filter results
    pub selective_bloom: Results,
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Min-Cut Results:\n")?;
        writeln!(f, "{}", self.min_cut)?;
        writeln!(f, "Selective Counting Bloom Filter Results:\n")?;
        write!(f, "{}", self.selective_bloom)
    }
}

/// Generate one workload and score both estimators on it.
///
/// Each estimator gets its own recency window. The observer, when given, is
/// shared by both.
///
/// # Errors
///
/// Fails when the workload or either estimator cannot be built from `config`.
pub fn run_comparison(
    config: &HeavyHittersConfig,
    observer: Option<Arc<dyn SketchObserver>>,
) -> HeavyHittersResult<Comparison> {
    let Workload { insert, query } = generate_workload(&config.workload)?;

    let mut min_cut = MinCut::new(config.min_cut.clone())?;
    let mut selective_bloom = SelectiveCountingBloomFilter::new(config.selective_bloom.clone())?;
    if let Some(observer) = observer {
        min_cut = min_cut.with_observer(Arc::clone(&observer));
        selective_bloom = selective_bloom.with_observer(observer);
    }

    Ok(Comparison {
        min_cut: run_trial(&mut min_cut, &insert, &query),
        selective_bloom: run_trial(&mut selective_bloom, &insert, &query),
    })
}
