//! Pairs actuator commands with derived ground truth, record by record.

use crate::chunker::{Windows, chunk};
use crate::error::DatasetError;
use crate::ground_truth::GroundTruth;
use crate::trace::Trace;

/// Values per input vector: m1, m2, m3, m4, heading.
pub const INPUT_WIDTH: usize = 5;
/// Values per target vector: vx, vy, w.
pub const TARGET_WIDTH: usize = 3;

pub type InputVector = [f64; INPUT_WIDTH];
pub type TargetVector = [f64; TARGET_WIDTH];

/// Index-aligned input and target sequences of one trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPairs {
    inputs: Vec<InputVector>,
    targets: Vec<TargetVector>,
}

impl RecordPairs {
    pub fn new(inputs: Vec<InputVector>, targets: Vec<TargetVector>) -> Result<Self, DatasetError> {
        if inputs.len() != targets.len() {
            return Err(DatasetError::LengthMismatch {
                what: "inputs vs targets",
                expected: inputs.len(),
                actual: targets.len(),
            });
        }
        Ok(Self { inputs, targets })
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

    /// Non-overlapping windows of `n` records. Calling again restarts.
    pub fn windows(&self, n: usize) -> Result<Windows<'_>, DatasetError> {
        chunk(&self.inputs, &self.targets, n)
    }
}

/// Build `[m1, m2, m3, m4, heading]` inputs and `[vx, vy, w]` targets.
pub fn assemble(trace: &Trace, gt: &GroundTruth) -> Result<RecordPairs, DatasetError> {
    let expected = trace.len();
    let derived = [
        ("heading", gt.heading.len()),
        ("vx", gt.vx.len()),
        ("vy", gt.vy.len()),
        ("w", gt.w.len()),
    ];
    for (what, actual) in derived {
        if actual != expected {
            return Err(DatasetError::LengthMismatch {
                what,
                expected,
                actual,
            });
        }
    }

    let [m1, m2, m3, m4] = trace.motors();
    let inputs = (0..expected)
        .map(|i| [m1[i], m2[i], m3[i], m4[i], gt.heading[i]])
        .collect();
    let targets = (0..expected)
        .map(|i| [gt.vx[i], gt.vy[i], gt.w[i]])
        .collect();
    RecordPairs::new(inputs, targets)
}
