//! `From` implementations bridging `robodata_config` types to `robodata_core` types.

use crate::config::{HeadingCfg, PartitionCfg, PipelineCfg, SplitRatios, VelocityCfg};

// ── VelocityCfg ──────────────────────────────────────────────────────────────

impl From<&robodata_config::VelocityCfg> for VelocityCfg {
    fn from(c: &robodata_config::VelocityCfg) -> Self {
        Self {
            filter_taps: c.filter_taps,
            time_scale: c.time_scale,
        }
    }
}

// ── HeadingCfg ───────────────────────────────────────────────────────────────

impl From<&robodata_config::HeadingCfg> for HeadingCfg {
    fn from(c: &robodata_config::HeadingCfg) -> Self {
        Self {
            period: c.period,
            discont: c.discont,
        }
    }
}

// ── SplitRatios ──────────────────────────────────────────────────────────────

impl From<&robodata_config::SplitCfg> for SplitRatios {
    fn from(c: &robodata_config::SplitCfg) -> Self {
        Self {
            train: c.train,
            validation: c.validation,
            test: c.test,
        }
    }
}

// ── PipelineCfg ──────────────────────────────────────────────────────────────

impl From<&robodata_config::Config> for PipelineCfg {
    fn from(c: &robodata_config::Config) -> Self {
        Self {
            velocity: (&c.velocity).into(),
            heading: (&c.heading).into(),
            partition: PartitionCfg {
                window_len: c.dataset.window_len,
                ratios: (&c.split).into(),
                seed: c.dataset.seed,
                parallel: c.dataset.parallel,
            },
        }
    }
}
