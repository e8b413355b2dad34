//! The seam between the pipeline and whatever reads tabular traces.

use std::path::Path;

use crate::error::Result;
use crate::trace::Trace;

/// Loads one trace per path. Reader errors (missing columns, malformed rows)
/// are returned as-is.
pub trait TraceSource {
    fn load(&self, path: &Path) -> Result<Trace>;
}

/// Reads traces from CSV files through `robodata_config::load_trace_csv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTraceSource;

impl TraceSource for CsvTraceSource {
    fn load(&self, path: &Path) -> Result<Trace> {
        let rows = robodata_config::load_trace_csv(path)?;
        tracing::debug!(path = %path.display(), records = rows.len(), "trace loaded");
        Ok(Trace::from_rows(&rows).with_label(path.display().to_string()))
    }
}

impl<S: TraceSource + ?Sized> TraceSource for &S {
    fn load(&self, path: &Path) -> Result<Trace> {
        (**self).load(path)
    }
}
