//! Command bodies: config mapping, pipeline assembly and summary output.

use std::path::{Path, PathBuf};

use robodata_config::Config;
use robodata_core::error::Result as CoreResult;
use robodata_core::util::min_max;
use robodata_core::{
    CsvTraceSource, DatasetPipeline, DatasetPipelineBuilder, SplitRatios, SplitSummary,
    TraceSource,
};
use eyre::WrapErr;
use serde_json::json;

/// CLI overrides for `split`.
#[derive(Debug, Default)]
pub struct SplitOverrides {
    pub window: Option<usize>,
    pub seed: Option<u64>,
    pub train: Option<f64>,
    pub validation: Option<f64>,
    pub test: Option<f64>,
    pub parallel: bool,
}

fn build_pipeline(cfg: &Config, o: &SplitOverrides) -> CoreResult<DatasetPipeline> {
    let base = SplitRatios::from(&cfg.split);
    let ratios = SplitRatios::new(
        o.train.unwrap_or(base.train),
        o.validation.unwrap_or(base.validation),
        o.test.unwrap_or(base.test),
    );
    let mut b = DatasetPipelineBuilder::from_config(cfg).with_ratios(ratios);
    if let Some(n) = o.window {
        b = b.with_window_len(n);
    }
    if let Some(s) = o.seed {
        b = b.with_seed(s);
    }
    if o.parallel {
        b = b.parallel(true);
    }
    b.build()
}

pub fn summary_json(s: &SplitSummary) -> serde_json::Value {
    json!({
        "traces": s.traces,
        "window_len": s.window_len,
        "pool": s.pool,
        "train": s.train,
        "validation": s.validation,
        "test": s.test,
        "dropped": s.dropped,
    })
}

pub fn run_split(
    cfg: &Config,
    paths: Vec<PathBuf>,
    overrides: &SplitOverrides,
    json: bool,
) -> CoreResult<SplitSummary> {
    let pipeline = build_pipeline(cfg, overrides)?;
    let paths = if paths.is_empty() {
        cfg.traces.clone()
    } else {
        paths
    };
    if paths.is_empty() {
        eyre::bail!("no trace paths given (pass PATH arguments or set `traces` in the config)");
    }

    tracing::info!(
        traces = paths.len(),
        window_len = pipeline.window_len(),
        seed = ?pipeline.cfg().partition.seed,
        "split start"
    );
    let split = pipeline.run(&CsvTraceSource, &paths)?;
    let s = split.summary();
    tracing::info!(pool = s.pool, dropped = s.dropped, "split complete");

    if json {
        println!("{}", json!({ "status": "complete", "summary": summary_json(&s) }));
    } else {
        println!(
            "Split complete: {} traces, {} windows of {} records",
            s.traces, s.pool, s.window_len
        );
        for (name, set) in [
            ("train", &split.train),
            ("validation", &split.validation),
            ("test", &split.test),
        ] {
            let (x, y) = set.to_arrays();
            println!(
                "  {name:<10} {:>6} windows  inputs {:?}  targets {:?}",
                set.len(),
                x.shape(),
                y.shape()
            );
        }
        println!("  dropped    {:>6} windows", s.dropped);
    }
    Ok(s)
}

pub fn run_inspect(cfg: &Config, path: &Path, window: Option<usize>, json: bool) -> CoreResult<()> {
    let overrides = SplitOverrides {
        window,
        ..SplitOverrides::default()
    };
    let pipeline = build_pipeline(cfg, &overrides)?;
    let trace = CsvTraceSource.load(path)?;
    let gt = pipeline
        .derive(&trace)
        .wrap_err_with(|| format!("process trace {}", path.display()))?;
    let pairs = pipeline.record_pairs(&trace)?;
    let windows = pairs.windows(pipeline.window_len())?;
    let n_windows = windows.len();
    let dropped = windows.remainder();

    let ts = trace.timestamps_ms();
    let duration_ms = match (ts.first(), ts.last()) {
        (Some(a), Some(b)) => b - a,
        _ => 0.0,
    };
    let range = |v: &[f64]| min_max(v).map(|(lo, hi)| [lo, hi]);

    if json {
        println!(
            "{}",
            json!({
                "path": path.display().to_string(),
                "records": trace.len(),
                "duration_ms": duration_ms,
                "windows": n_windows,
                "dropped_records": dropped,
                "vx": range(&gt.vx),
                "vy": range(&gt.vy),
                "w": range(&gt.w),
                "heading": range(&gt.heading),
            })
        );
    } else {
        println!("Trace: {}", path.display());
        println!("  records   {}", trace.len());
        println!("  duration  {:.3} s", duration_ms / 1000.0);
        println!(
            "  windows   {} of {} records ({} trailing records dropped)",
            n_windows,
            pipeline.window_len(),
            dropped
        );
        for (name, ch) in [
            ("vx", &gt.vx),
            ("vy", &gt.vy),
            ("w", &gt.w),
            ("heading", &gt.heading),
        ] {
            match min_max(ch) {
                Some((lo, hi)) => println!("  {name:<9} [{lo:.4}, {hi:.4}]"),
                None => println!("  {name:<9} n/a"),
            }
        }
    }
    Ok(())
}
