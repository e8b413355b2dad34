//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "robodata", version, about = "Robot motion dataset preparation")]
pub struct Cli {
    /// Path to config TOML (defaults apply when omitted)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log and report as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging].level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive, window, pool and split traces; print the split summary
    Split {
        /// Trace CSV files (defaults to `traces` from the config)
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
        /// Override dataset.window_len
        #[arg(long, value_name = "N")]
        window: Option<usize>,
        /// Override dataset.seed
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
        /// Override split.train
        #[arg(long, value_name = "RATIO")]
        train: Option<f64>,
        /// Override split.validation
        #[arg(long = "val", value_name = "RATIO")]
        validation: Option<f64>,
        /// Override split.test
        #[arg(long, value_name = "RATIO")]
        test: Option<f64>,
        /// Process traces on worker threads
        #[arg(long, action = ArgAction::SetTrue)]
        parallel: bool,
    },
    /// Derive ground truth for one trace and report its ranges
    Inspect {
        /// Trace CSV file
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// Override dataset.window_len for the window count
        #[arg(long, value_name = "N")]
        window: Option<usize>,
    },
    /// Parse and validate the config file
    CheckConfig,
}
