//! Velocity estimation from a sampled position (or heading) channel.
//!
//! The raw derivative is a backward finite difference scaled to per-second
//! units, then smoothed with a causal moving-average FIR filter whose taps
//! all weigh `1 / filter_taps`. Samples before the start of the channel are
//! treated as zero, so the first `filter_taps - 1` outputs ramp up.

use crate::config::VelocityCfg;
use crate::error::DatasetError;
use crate::trace::Channel;

/// Backward finite difference of `values` against `timestamps`.
///
/// Element 0 is always 0. For `i >= 1` the result is
/// `(v[i] - v[i-1]) / (t[i] - t[i-1]) * time_scale`.
///
/// Fails with `DegenerateTimestamp` when a timestamp does not strictly
/// advance, instead of producing an infinite or NaN rate.
pub fn finite_difference(
    values: &[f64],
    timestamps: &[f64],
    time_scale: f64,
) -> Result<Vec<f64>, DatasetError> {
    if values.len() != timestamps.len() {
        return Err(DatasetError::LengthMismatch {
            what: "channel vs timestamps",
            expected: timestamps.len(),
            actual: values.len(),
        });
    }
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return Ok(out);
    }
    out.push(0.0);
    for i in 1..values.len() {
        let dt = timestamps[i] - timestamps[i - 1];
        // `!(dt > 0)` also catches NaN timestamps
        if !(dt > 0.0) {
            return Err(DatasetError::DegenerateTimestamp {
                index: i,
                timestamp_ms: timestamps[i],
            });
        }
        out.push((values[i] - values[i - 1]) / dt * time_scale);
    }
    Ok(out)
}

/// Causal moving average over the trailing `taps` samples, zero-padded at
/// the start. `taps` is clamped to at least 1 (pass-through).
pub fn moving_average(raw: &[f64], taps: usize) -> Vec<f64> {
    let taps = taps.max(1);
    let weight = 1.0 / taps as f64;
    (0..raw.len())
        .map(|n| {
            let lo = (n + 1).saturating_sub(taps);
            raw[lo..=n].iter().map(|x| x * weight).sum()
        })
        .collect()
}

/// Smoothed velocity channel of the same length as `values`.
pub fn estimate_velocity(
    values: &[f64],
    timestamps: &[f64],
    cfg: &VelocityCfg,
) -> Result<Channel, DatasetError> {
    let raw = finite_difference(values, timestamps, cfg.time_scale)?;
    Ok(Channel::new(moving_average(&raw, cfg.filter_taps)))
}
