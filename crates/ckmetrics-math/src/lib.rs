//! Deterministic numeric helpers.

#![forbid(unsafe_code)]

/// `numer / denom`, or 0 when the denominator is zero.
#[must_use]
pub fn guarded_ratio(numer: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        numer as f64 / denom as f64
    }
}

/// Arithmetic mean from a running sum, 0 for an empty series.
#[must_use]
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Clamp into `[0, 1]`. NaN maps to 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Number of unordered pairs among `n` items.
#[must_use]
pub fn pair_count(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1)) / 2
}

/// Largest value of a float series, 0 for an empty series.
#[must_use]
pub fn max_or_zero(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, f64::max)
}
