//! Ground-truth pose and velocity derived from the vision channels of a trace.

use crate::config::{HeadingCfg, VelocityCfg};
use crate::error::DatasetError;
use crate::trace::{Channel, Trace};
use crate::unwrap::unwrap_phase;
use crate::velocity::estimate_velocity;

/// Derived channels for one trace. All channels have the trace's length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruth {
    /// Vision x relative to the first sample.
    pub rel_x: Channel,
    /// Vision y relative to the first sample.
    pub rel_y: Channel,
    /// Unwrapped vision heading.
    pub heading: Channel,
    pub vx: Channel,
    pub vy: Channel,
    /// Angular rate from the unwrapped heading.
    pub w: Channel,
}

impl GroundTruth {
    pub fn len(&self) -> usize {
        self.rel_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rel_x.is_empty()
    }
}

/// `values[i] - values[0]` for every sample.
pub fn relative_to_first(values: &[f64]) -> Channel {
    let Some(&origin) = values.first() else {
        return Channel::default();
    };
    Channel::new(values.iter().map(|v| v - origin).collect())
}

/// Derive relative position, unwrapped heading and the three velocity
/// channels. The trace itself is left untouched.
pub fn derive(
    trace: &Trace,
    velocity: &VelocityCfg,
    heading: &HeadingCfg,
) -> Result<GroundTruth, DatasetError> {
    let ts = trace.timestamps_ms();
    let rel_x = relative_to_first(trace.vision_x());
    let rel_y = relative_to_first(trace.vision_y());
    let heading = unwrap_phase(trace.vision_w(), heading);

    let vx = estimate_velocity(&rel_x, ts, velocity)?;
    let vy = estimate_velocity(&rel_y, ts, velocity)?;
    let w = estimate_velocity(&heading, ts, velocity)?;

    tracing::trace!(
        trace = trace.label().unwrap_or("<memory>"),
        records = trace.len(),
        "ground truth derived"
    );

    Ok(GroundTruth {
        rel_x,
        rel_y,
        heading,
        vx,
        vy,
        w,
    })
}
