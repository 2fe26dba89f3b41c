//! Descriptive statistics for numeric columns
//!
//! Quartiles use linear interpolation between order statistics (index
//! `(n - 1) * p`) and the standard deviation is the sample one (divisor
//! `n - 1`). Both are pinned here so every caller agrees.
//!
//! The mean is a running update and the deviation is accumulated over
//! values scaled by the largest magnitude, so finite inputs never overflow
//! an intermediate. Results that are themselves beyond `f64` range (the sum
//! or range of values near `f64::MAX`) are reported as `None`.

use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Descriptive statistics of one column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnStats {
    pub column: String,

    /// Cells that coerced to a number
    pub numeric_count: usize,

    /// Missing or non-numeric cells
    pub skipped_count: usize,

    /// `None` when the total exceeds the `f64` range
    pub sum: Option<f64>,
    pub mean: f64,
    pub median: f64,
    /// `None` when the deviation exceeds the `f64` range
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    /// `None` when `max - min` exceeds the `f64` range
    pub range: Option<f64>,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

/// Compute statistics over the cells of `column` that coerce to numbers
pub fn compute_numeric_stats(dataset: &Dataset, column: &str) -> Result<ColumnStats> {
    dataset.require_column(column)?;

    let mut values = Vec::with_capacity(dataset.len());
    let mut skipped_count = 0;

    for row in dataset.rows() {
        match row.get(column).and_then(Value::as_number) {
            Some(n) => values.push(n),
            None => skipped_count += 1,
        }
    }

    if values.is_empty() {
        return Err(AnalysisError::NoNumericData(column.to_string()));
    }

    values.sort_by(f64::total_cmp);

    let (min, max) = (values[0], values[values.len() - 1]);
    let stats = ColumnStats {
        column: column.to_string(),
        numeric_count: values.len(),
        skipped_count,
        sum: finite(values.iter().sum()),
        mean: mean(&values),
        median: median(&values),
        std_dev: finite(sample_std_dev(&values)),
        min,
        max,
        range: finite(max - min),
        q1: quantile_linear(&values, 0.25),
        q2: quantile_linear(&values, 0.5),
        q3: quantile_linear(&values, 0.75),
    };

    debug!(
        "Computed stats for {}: {} numeric, {} skipped",
        column, stats.numeric_count, stats.skipped_count
    );

    Ok(stats)
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Arithmetic mean, 0 for no values
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    let mut m = 0.0;
    for (i, x) in values.iter().enumerate() {
        let k = (i + 1) as f64;
        m += x / k - m / k;
    }
    m
}

/// Middle of sorted values; mean of the two middle values for even counts
#[must_use]
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 0 => f64::midpoint(sorted[n / 2 - 1], sorted[n / 2]),
        _ => sorted[n / 2],
    }
}

/// Sample standard deviation (divisor `n - 1`), 0 for fewer than two values
///
/// Welford's update over values divided by the largest magnitude. The result
/// is infinite only when the deviation itself exceeds `f64::MAX`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let scale = values.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if scale == 0.0 {
        return 0.0;
    }

    let mut m = 0.0;
    let mut m2 = 0.0;
    for (i, x) in values.iter().enumerate() {
        let y = x / scale;
        let delta = y - m;
        m += delta / (i + 1) as f64;
        m2 = delta.mul_add(y - m, m2);
    }

    scale * (m2 / (values.len() - 1) as f64).sqrt()
}

/// Quantile `p` of sorted values by linear interpolation at `(n - 1) * p`
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - pos.floor();
    if frac == 0.0 {
        return sorted[lo];
    }
    sorted[lo].mul_add(1.0 - frac, sorted[hi] * frac)
}
