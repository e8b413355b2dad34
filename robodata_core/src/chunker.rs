//! Fixed-length, non-overlapping windowing of aligned record sequences.
//!
//! A sequence of `L` records yields `floor(L / N)` windows covering
//! `[k*N, (k+1)*N)`. The trailing `L mod N` records are dropped, never padded.

use std::iter::{Enumerate, FusedIterator, Zip};
use std::slice::ChunksExact;

use crate::assembler::{InputVector, TargetVector};
use crate::error::DatasetError;

/// Identity of a window: which trace it came from and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId {
    pub trace: usize,
    pub start: usize,
}

/// One training example: `N` consecutive input and target vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: WindowId,
    inputs: Vec<InputVector>,
    targets: Vec<TargetVector>,
}

impl Window {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &[InputVector] {
        &self.inputs
    }

    pub fn targets(&self) -> &[TargetVector] {
        &self.targets
    }
}

/// Lazy window iterator. Cloning it restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    chunks: Enumerate<Zip<ChunksExact<'a, InputVector>, ChunksExact<'a, TargetVector>>>,
    window_len: usize,
    trace: usize,
    remainder: usize,
}

impl Windows<'_> {
    /// Tag produced windows with the index of their source trace.
    pub fn with_trace_index(mut self, trace: usize) -> Self {
        self.trace = trace;
        self
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Trailing records that do not fill a window.
    pub fn remainder(&self) -> usize {
        self.remainder
    }
}

impl Iterator for Windows<'_> {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        let (k, (inputs, targets)) = self.chunks.next()?;
        Some(Window {
            id: WindowId {
                trace: self.trace,
                start: k * self.window_len,
            },
            inputs: inputs.to_vec(),
            targets: targets.to_vec(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Windows<'_> {}
impl FusedIterator for Windows<'_> {}

/// Split aligned `inputs`/`targets` into windows of `n` records.
pub fn chunk<'a>(
    inputs: &'a [InputVector],
    targets: &'a [TargetVector],
    n: usize,
) -> Result<Windows<'a>, DatasetError> {
    if n == 0 {
        return Err(DatasetError::InvalidWindowLength);
    }
    if inputs.len() != targets.len() {
        return Err(DatasetError::LengthMismatch {
            what: "inputs vs targets",
            expected: inputs.len(),
            actual: targets.len(),
        });
    }
    Ok(Windows {
        chunks: inputs.chunks_exact(n).zip(targets.chunks_exact(n)).enumerate(),
        window_len: n,
        trace: 0,
        remainder: inputs.len() % n,
    })
}
