// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Admission bound and posterior probability.

use std::f64::consts::LN_2;

/// Prior below which admitting a key costs more accuracy than it buys.
///
/// `1 / (1 + alpha * 2^(ln 2 * bf_size / fill))`. Overflow of the power
/// yields a bound of 0.
pub(crate) fn admission_bound(alpha: f64, bf_size: usize, fill: usize) -> f64 {
    let exponent = LN_2 * bf_size as f64 / fill as f64;
    1.0 / (1.0 + alpha * exponent.exp2())
}

/// Probability that a key whose counters are all positive was really admitted.
///
/// Algebraically this is
///
/// ```text
///            bf_size^k * Π c_i * p
/// ---------------------------------------------------
/// bf_size^k * Π c_i * p + (n * k)^k * (1 - p)
/// ```
///
/// evaluated as `1 / (1 + exp(L))` with `L` the log-ratio of the second term
/// to the first, so that neither `bf_size^k` nor the counter product can
/// overflow. Degenerate priors resolve to 0 (`p <= 0`) and 1 (`p >= 1`), and a
/// zero counter always gives 0.
pub(crate) fn posterior(bf_size: usize, admitted: usize, counters: &[u64], prior: f64) -> f64 {
    if counters.iter().any(|&c| c == 0) || prior <= 0.0 || prior.is_nan() {
        return 0.0;
    }
    if prior >= 1.0 || admitted == 0 {
        return 1.0;
    }

    let k = counters.len() as f64;
    let log_evidence =
        k * (bf_size as f64).ln() + counters.iter().map(|&c| (c as f64).ln()).sum::<f64>() + prior.ln();
    let log_noise = k * (admitted as f64 * k).ln() + (1.0 - prior).ln();

    1.0 / (1.0 + (log_noise - log_evidence).exp())
}
