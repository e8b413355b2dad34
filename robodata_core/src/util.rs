//! Small numeric helpers shared across the pipeline.

/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: f64 = 1_000.0;

/// Smallest and largest finite value of a slice, or `None` when there is none.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `floor(ratio * count)`, saturating at zero for negative or NaN ratios.
#[inline]
pub fn floor_fraction(ratio: f64, count: usize) -> usize {
    let scaled = (ratio * count as f64).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        scaled as usize
    }
}
