// src/processing/reducers.rs
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Temporal reduction policy, selected per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reduction {
    Maximum,
    Mean,
    Median,
    /// Two-tier rule of the naturalness product: if the mean water
    /// indicator is >= 0.5 the pixel reduces to 1.0, otherwise to the
    /// median of the index scalars.
    WaterMajority,
}

/// Maximum with an explicit identity seed of 0.
///
/// Known limitation: the result cannot distinguish "no observation" from
/// "observed exactly 0", and all-negative sequences also report 0.
pub fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Arithmetic mean, 0 on an empty sequence.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median over a sorted copy; the caller's ordering is left untouched.
/// Empty input is undefined and returned as `None` for the caller to
/// resolve.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted: Vec<f64> = values.iter().copied().sorted_by(f64::total_cmp).collect();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
