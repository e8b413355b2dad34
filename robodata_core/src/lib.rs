#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Dataset preparation for a mobile-robot motion model.
//!
//! Turns logged robot runs into fixed-length training windows. The reader
//! behind `source::TraceSource` supplies each trace; everything after that is
//! pure computation over immutable values.
//!
//! ## Architecture
//!
//! - **Velocity**: finite difference + causal moving average (`velocity`)
//! - **Unwrapping**: period-pi heading unwrap (`unwrap`)
//! - **Ground truth**: relative pose, heading and rates per trace (`ground_truth`)
//! - **Assembly**: `[m1, m2, m3, m4, heading]` → `[vx, vy, w]` pairs (`assembler`)
//! - **Chunking**: non-overlapping windows of N records (`chunker`)
//! - **Partitioning**: pooled shuffle and ratio split (`partition`)
//! - **Pipeline**: validated configuration and end-to-end run (`builder`, `runner`)
//!
//! ## Units
//!
//! Timestamps are milliseconds. With the default `time_scale` of 1000,
//! velocities come out per second.

pub mod assembler;
pub mod builder;
pub mod chunker;
pub mod config;
pub mod conversions;
pub mod error;
pub mod ground_truth;
pub mod mocks;
pub mod partition;
pub mod runner;
pub mod source;
pub mod trace;
pub mod unwrap;
pub mod util;
pub mod velocity;

pub use assembler::{INPUT_WIDTH, InputVector, RecordPairs, TARGET_WIDTH, TargetVector, assemble};
pub use builder::{DatasetPipeline, DatasetPipelineBuilder};
pub use chunker::{Window, WindowId, Windows, chunk};
pub use config::{HeadingCfg, PartitionCfg, PipelineCfg, SplitRatios, VelocityCfg};
pub use error::{BuildError, DatasetError};
pub use ground_truth::{GroundTruth, derive};
pub use partition::{
    DatasetSplit, SplitSizes, SplitSummary, WindowPool, WindowSet, partition, shuffle_rng,
    split_sizes,
};
pub use source::{CsvTraceSource, TraceSource};
pub use trace::{Channel, Trace};
pub use velocity::estimate_velocity;
