//! `DatasetPipeline` and its builder.
//!
//! Every knob has a default; `build()` validates the combination and
//! returns `BuildError::InvalidConfig` for out-of-range values.

use std::path::PathBuf;

use crate::assembler::{RecordPairs, assemble};
use crate::chunker::Window;
use crate::config::*;
use crate::error::{BuildError, DatasetError, Result};
use crate::ground_truth::{GroundTruth, derive};
use crate::partition::{DatasetSplit, WindowPool, partition, shuffle_rng};
use crate::runner::{collect_pool, trace_windows};
use crate::source::TraceSource;
use crate::trace::Trace;

/// A validated, reusable pipeline configuration.
#[derive(Debug, Clone)]
pub struct DatasetPipeline {
    cfg: PipelineCfg,
}

impl DatasetPipeline {
    /// Start building a pipeline.
    pub fn builder() -> DatasetPipelineBuilder {
        DatasetPipelineBuilder::default()
    }

    pub fn cfg(&self) -> &PipelineCfg {
        &self.cfg
    }

    pub fn window_len(&self) -> usize {
        self.cfg.partition.window_len
    }

    /// Ground truth for one trace.
    pub fn derive(&self, trace: &Trace) -> std::result::Result<GroundTruth, DatasetError> {
        derive(trace, &self.cfg.velocity, &self.cfg.heading)
    }

    /// Aligned input/target vectors for one trace.
    pub fn record_pairs(&self, trace: &Trace) -> std::result::Result<RecordPairs, DatasetError> {
        let gt = self.derive(trace)?;
        assemble(trace, &gt)
    }

    /// Windows for one trace, tagged with `index`.
    pub fn windows(
        &self,
        trace: &Trace,
        index: usize,
    ) -> std::result::Result<Vec<Window>, DatasetError> {
        trace_windows(trace, index, &self.cfg)
    }

    /// Load and window every path without partitioning.
    pub fn pool<S: TraceSource + Sync + ?Sized>(
        &self,
        source: &S,
        paths: &[PathBuf],
    ) -> Result<WindowPool> {
        collect_pool(source, paths, &self.cfg)
    }

    /// Full run: pool every path, shuffle with the configured seed, split.
    pub fn run<S: TraceSource + Sync + ?Sized>(
        &self,
        source: &S,
        paths: &[PathBuf],
    ) -> Result<DatasetSplit> {
        let pool = self.pool(source, paths)?;
        let mut rng = shuffle_rng(self.cfg.partition.seed);
        let split = partition(pool, &self.cfg.partition.ratios, &mut rng)?;
        Ok(split)
    }
}

/// Builder for `DatasetPipeline`. All fields are validated on `build()`.
#[derive(Debug, Default)]
pub struct DatasetPipelineBuilder {
    velocity: Option<VelocityCfg>,
    heading: Option<HeadingCfg>,
    window_len: Option<usize>,
    ratios: Option<SplitRatios>,
    seed: Option<u64>,
    parallel: bool,
}

impl DatasetPipelineBuilder {
    /// Seed the builder from a parsed config file.
    pub fn from_config(cfg: &robodata_config::Config) -> Self {
        let p: PipelineCfg = cfg.into();
        Self {
            velocity: Some(p.velocity),
            heading: Some(p.heading),
            window_len: Some(p.partition.window_len),
            ratios: Some(p.partition.ratios),
            seed: p.partition.seed,
            parallel: p.partition.parallel,
        }
    }

    pub fn with_velocity(mut self, velocity: VelocityCfg) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_heading(mut self, heading: HeadingCfg) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_window_len(mut self, n: usize) -> Self {
        self.window_len = Some(n);
        self
    }

    pub fn with_ratios(mut self, ratios: SplitRatios) -> Self {
        self.ratios = Some(ratios);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn parallel(mut self, on: bool) -> Self {
        self.parallel = on;
        self
    }

    pub fn build(self) -> Result<DatasetPipeline> {
        let velocity = self.velocity.unwrap_or_default();
        let heading = self.heading.unwrap_or_default();
        let window_len = self.window_len.unwrap_or(DEFAULT_WINDOW_LEN);
        let ratios = self.ratios.unwrap_or_default();

        if window_len == 0 {
            return Err(BuildError::InvalidConfig("window_len must be >= 1").into());
        }
        if velocity.filter_taps == 0 {
            return Err(BuildError::InvalidConfig("filter_taps must be >= 1").into());
        }
        if !(velocity.time_scale.is_finite() && velocity.time_scale > 0.0) {
            return Err(BuildError::InvalidConfig("time_scale must be > 0").into());
        }
        if !(heading.period.is_finite() && heading.period > 0.0) {
            return Err(BuildError::InvalidConfig("heading period must be > 0").into());
        }
        for r in [ratios.train, ratios.validation, ratios.test] {
            if !(0.0..=1.0).contains(&r) {
                return Err(BuildError::InvalidConfig("split ratios must be in [0.0, 1.0]").into());
            }
        }

        Ok(DatasetPipeline {
            cfg: PipelineCfg {
                velocity,
                heading,
                partition: PartitionCfg {
                    window_len,
                    ratios,
                    seed: self.seed,
                    parallel: self.parallel,
                },
            },
        })
    }
}
