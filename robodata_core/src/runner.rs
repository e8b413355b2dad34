//! Per-path processing and pool collection.
//!
//! Each path is loaded, derived, assembled and windowed independently. In
//! parallel mode scoped worker threads pull path indices from a channel and
//! send results back; results are re-ordered by path index before pooling so
//! the pool (and therefore a seeded split) is identical to a serial run.
use crossbeam_channel as xch;
use eyre::WrapErr;
use std::path::{Path, PathBuf};

use crate::assembler::assemble;
use crate::chunker::Window;
use crate::config::PipelineCfg;
use crate::error::{DatasetError, Result};
use crate::ground_truth::derive;
use crate::partition::WindowPool;
use crate::source::TraceSource;
use crate::trace::Trace;

/// Ground truth → record pairs → windows for one trace. `index` tags the
/// windows with their source trace.
pub fn trace_windows(
    trace: &Trace,
    index: usize,
    cfg: &PipelineCfg,
) -> std::result::Result<Vec<Window>, DatasetError> {
    let gt = derive(trace, &cfg.velocity, &cfg.heading)?;
    let pairs = assemble(trace, &gt)?;
    let windows = pairs
        .windows(cfg.partition.window_len)?
        .with_trace_index(index);
    let dropped = windows.remainder();
    let out: Vec<Window> = windows.collect();
    tracing::debug!(
        trace = trace.label().unwrap_or("<memory>"),
        records = trace.len(),
        windows = out.len(),
        dropped,
        "trace windowed"
    );
    Ok(out)
}

fn load_and_window<S: TraceSource + ?Sized>(
    source: &S,
    path: &Path,
    index: usize,
    cfg: &PipelineCfg,
) -> Result<Vec<Window>> {
    let trace = source
        .load(path)
        .wrap_err_with(|| format!("load trace {}", path.display()))?;
    trace_windows(&trace, index, cfg).wrap_err_with(|| format!("process trace {}", path.display()))
}

/// Process every path and pool the resulting windows. Fails on the first
/// path (in path order) that errors.
pub fn collect_pool<S: TraceSource + Sync + ?Sized>(
    source: &S,
    paths: &[PathBuf],
    cfg: &PipelineCfg,
) -> Result<WindowPool> {
    let mut pool = WindowPool::new(cfg.partition.window_len);
    if cfg.partition.parallel && paths.len() > 1 {
        for windows in collect_parallel(source, paths, cfg)? {
            pool.add_trace(windows);
        }
    } else {
        for (i, path) in paths.iter().enumerate() {
            pool.add_trace(load_and_window(source, path, i, cfg)?);
        }
    }
    tracing::info!(
        traces = pool.traces(),
        windows = pool.len(),
        window_len = pool.window_len(),
        "window pool collected"
    );
    Ok(pool)
}

fn collect_parallel<S: TraceSource + Sync + ?Sized>(
    source: &S,
    paths: &[PathBuf],
    cfg: &PipelineCfg,
) -> Result<Vec<Vec<Window>>> {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(paths.len())
        .max(1);

    let (job_tx, job_rx) = xch::unbounded::<(usize, &Path)>();
    let (res_tx, res_rx) = xch::unbounded::<(usize, Result<Vec<Window>>)>();
    for (i, p) in paths.iter().enumerate() {
        // Receiver is alive in this scope; send cannot fail
        let _ = job_tx.send((i, p.as_path()));
    }
    drop(job_tx);

    std::thread::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let res_tx = res_tx.clone();
            s.spawn(move || {
                for (i, path) in job_rx.iter() {
                    let r = load_and_window(source, path, i, cfg);
                    if res_tx.send((i, r)).is_err() {
                        tracing::debug!("result consumer disconnected, exiting worker");
                        break;
                    }
                }
            });
        }
    });
    drop(res_tx);

    let mut results: Vec<(usize, Result<Vec<Window>>)> = res_rx.iter().collect();
    results.sort_by_key(|(i, _)| *i);
    tracing::trace!(workers, traces = results.len(), "parallel windowing finished");
    results.into_iter().map(|(_, r)| r).collect()
}
