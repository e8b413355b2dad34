#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and trace CSV parsing for the dataset pipeline.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The trace CSV loader enforces the required columns and reports the
//!   offending line for malformed rows.
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Columns every trace CSV must carry. Header names are compared after
/// trimming, so the logger's `" VISION_X"` style headers are accepted.
pub const TRACE_COLUMNS: [&str; 8] = [
    "TIMESTAMP",
    "VISION_X",
    "VISION_Y",
    "VISION_W",
    "ROBOT_M1",
    "ROBOT_M2",
    "ROBOT_M3",
    "ROBOT_M4",
];

/// One logged record of a robot run.
///
/// Expected headers (any order, extra columns ignored):
/// TIMESTAMP,VISION_X,VISION_Y,VISION_W,ROBOT_M1,ROBOT_M2,ROBOT_M3,ROBOT_M4
///
/// Example:
/// TIMESTAMP, VISION_X, VISION_Y, VISION_W, ROBOT_M1, ROBOT_M2, ROBOT_M3, ROBOT_M4
/// 1000, 0.52, 1.10, 0.03, 12.0, -12.0, 12.0, -12.0
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TraceRow {
    /// Milliseconds.
    #[serde(rename = "TIMESTAMP")]
    pub timestamp_ms: f64,
    #[serde(rename = "VISION_X")]
    pub vision_x: f64,
    #[serde(rename = "VISION_Y")]
    pub vision_y: f64,
    /// Heading in radians.
    #[serde(rename = "VISION_W")]
    pub vision_w: f64,
    #[serde(rename = "ROBOT_M1")]
    pub m1: f64,
    #[serde(rename = "ROBOT_M2")]
    pub m2: f64,
    #[serde(rename = "ROBOT_M3")]
    pub m3: f64,
    #[serde(rename = "ROBOT_M4")]
    pub m4: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatasetCfg {
    /// Records per window (N).
    pub window_len: usize,
    /// Shuffle seed; absent means an OS-seeded shuffle.
    pub seed: Option<u64>,
    /// Process trace paths on worker threads before pooling.
    pub parallel: bool,
}

impl Default for DatasetCfg {
    fn default() -> Self {
        Self {
            window_len: 100,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SplitCfg {
    pub train: f64,
    /// Also accepts alias "val".
    #[serde(alias = "val")]
    pub validation: f64,
    pub test: f64,
}

impl Default for SplitCfg {
    fn default() -> Self {
        Self {
            train: 0.8,
            validation: 0.1,
            test: 0.1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VelocityCfg {
    /// Moving-average taps applied to the raw derivative (1 = no smoothing).
    pub filter_taps: usize,
    /// Multiplier turning per-timestamp-unit rates into per-second rates.
    pub time_scale: f64,
}

impl Default for VelocityCfg {
    fn default() -> Self {
        Self {
            filter_taps: 20,
            time_scale: 1000.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HeadingCfg {
    /// Unwrapping period in radians.
    pub period: f64,
    /// Minimum jump treated as a wrap; absent means `period / 2`.
    pub discont: Option<f64>,
}

impl Default for HeadingCfg {
    fn default() -> Self {
        Self {
            period: std::f64::consts::PI,
            discont: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Trace files used when the caller does not pass any.
    #[serde(default)]
    pub traces: Vec<PathBuf>,
    #[serde(default)]
    pub dataset: DatasetCfg,
    #[serde(default)]
    pub split: SplitCfg,
    #[serde(default)]
    pub velocity: VelocityCfg,
    #[serde(default)]
    pub heading: HeadingCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_config_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Parse trace rows from any CSV reader. `label` names the source in errors.
pub fn read_trace_csv<R: std::io::Read>(reader: R, label: &str) -> eyre::Result<Vec<TraceRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers of {}: {}", label, e))?
        .clone();
    for col in TRACE_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            eyre::bail!("trace CSV {} is missing column '{}'", label, col);
        }
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<TraceRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {} in {}: {}", idx + 2, label, e);
            }
        }
    }
    Ok(rows)
}

pub fn load_trace_csv(path: &Path) -> eyre::Result<Vec<TraceRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open trace CSV {:?}: {}", path, e))?;
    read_trace_csv(std::io::BufReader::new(file), &format!("{path:?}"))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Dataset
        if self.dataset.window_len == 0 {
            eyre::bail!("dataset.window_len must be >= 1");
        }

        // Split
        for (name, r) in [
            ("split.train", self.split.train),
            ("split.validation", self.split.validation),
            ("split.test", self.split.test),
        ] {
            if !r.is_finite() || !(0.0..=1.0).contains(&r) {
                eyre::bail!("{} must be in [0.0, 1.0]", name);
            }
        }

        // Velocity
        if self.velocity.filter_taps == 0 {
            eyre::bail!("velocity.filter_taps must be >= 1");
        }
        if !self.velocity.time_scale.is_finite() || self.velocity.time_scale <= 0.0 {
            eyre::bail!("velocity.time_scale must be > 0");
        }

        // Heading
        if !self.heading.period.is_finite() || self.heading.period <= 0.0 {
            eyre::bail!("heading.period must be > 0");
        }
        if let Some(d) = self.heading.discont
            && !(d.is_finite() && d > 0.0)
        {
            eyre::bail!("heading.discont must be > 0");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
