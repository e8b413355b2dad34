//! Test and helper mocks for robodata_core

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::source::TraceSource;
use crate::trace::Trace;

/// Serves pre-built traces keyed by path; unknown paths are an error.
#[derive(Debug, Clone, Default)]
pub struct MemoryTraceSource {
    traces: HashMap<PathBuf, Trace>,
}

impl MemoryTraceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, trace: Trace) {
        let path = path.into();
        let trace = trace.with_label(path.display().to_string());
        self.traces.insert(path, trace);
    }

    pub fn with_trace(mut self, path: impl Into<PathBuf>, trace: Trace) -> Self {
        self.insert(path, trace);
        self
    }
}

impl TraceSource for MemoryTraceSource {
    fn load(&self, path: &Path) -> Result<Trace> {
        self.traces
            .get(path)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no trace registered for {}", path.display()))
    }
}
