//! Configuration types for the dataset pipeline.
//!
//! These are the runtime configuration structs used by `DatasetPipeline`.
//! They are separate from the TOML-deserialized config in `robodata_config`.

use crate::util::MILLIS_PER_SEC;

/// Moving-average taps applied to raw derivatives by default.
pub const DEFAULT_FILTER_TAPS: usize = 20;
/// Records per window by default.
pub const DEFAULT_WINDOW_LEN: usize = 100;

/// Velocity estimation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCfg {
    /// Causal moving-average length over the raw derivative (1 = disabled).
    pub filter_taps: usize,
    /// Multiplier applied to `value / timestamp-unit` rates. 1000 turns
    /// per-millisecond rates into per-second rates.
    pub time_scale: f64,
}

impl Default for VelocityCfg {
    fn default() -> Self {
        Self {
            filter_taps: DEFAULT_FILTER_TAPS,
            time_scale: MILLIS_PER_SEC,
        }
    }
}

/// Heading unwrapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingCfg {
    /// Period of the angle convention, in radians. The vision system reports
    /// headings that wrap every pi.
    pub period: f64,
    /// Smallest jump treated as a wrap. `None` (or anything below
    /// `period / 2`) means `period / 2`.
    pub discont: Option<f64>,
}

impl HeadingCfg {
    /// Effective wrap threshold.
    #[inline]
    pub fn threshold(&self) -> f64 {
        let half = self.period / 2.0;
        self.discont.map_or(half, |d| d.max(half))
    }
}

impl Default for HeadingCfg {
    fn default() -> Self {
        Self {
            period: std::f64::consts::PI,
            discont: None,
        }
    }
}

/// Fractions of the pooled windows assigned to each subset. Applied
/// independently; they are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    pub train: f64,
    pub validation: f64,
    pub test: f64,
}

impl SplitRatios {
    pub fn new(train: f64, validation: f64, test: f64) -> Self {
        Self {
            train,
            validation,
            test,
        }
    }

    pub fn sum(&self) -> f64 {
        self.train + self.validation + self.test
    }
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self::new(0.8, 0.1, 0.1)
    }
}

/// Windowing and partitioning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionCfg {
    /// Records per window (N).
    pub window_len: usize,
    pub ratios: SplitRatios,
    /// Shuffle seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Load and window traces on worker threads.
    pub parallel: bool,
}

impl Default for PartitionCfg {
    fn default() -> Self {
        Self {
            window_len: DEFAULT_WINDOW_LEN,
            ratios: SplitRatios::default(),
            seed: None,
            parallel: false,
        }
    }
}

/// Everything a pipeline run needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineCfg {
    pub velocity: VelocityCfg,
    pub heading: HeadingCfg,
    pub partition: PartitionCfg,
}
