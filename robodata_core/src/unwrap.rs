//! Phase unwrapping for cyclic signals.
//!
//! For each step `d = p[i] - p[i-1]`, the step is folded into
//! `[-period/2, period/2)` (a positive step landing exactly on `-period/2`
//! folds to `+period/2`). When `|d|` reaches the wrap threshold, the
//! difference between the folded and the raw step is added to every later
//! sample.

use crate::config::HeadingCfg;
use crate::trace::Channel;

/// Unwrap `values` with the period and threshold from `cfg`.
pub fn unwrap_phase(values: &[f64], cfg: &HeadingCfg) -> Channel {
    let period = cfg.period;
    let half = period / 2.0;
    let threshold = cfg.threshold();

    let mut out = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return Channel::default();
    };
    out.push(first);

    let mut correction = 0.0;
    for pair in values.windows(2) {
        let d = pair[1] - pair[0];
        let mut folded = (d + half).rem_euclid(period) - half;
        if folded == -half && d > 0.0 {
            folded = half;
        }
        if d.abs() >= threshold {
            correction += folded - d;
        }
        out.push(pair[1] + correction);
    }
    Channel::new(out)
}
