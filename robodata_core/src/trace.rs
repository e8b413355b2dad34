//! Immutable trace and channel value objects.
//!
//! A `Trace` is read once per source file and never modified afterwards.
//! Every derived signal is returned as a fresh `Channel` instead of being
//! appended to the trace.

use robodata_config::TraceRow;

use crate::error::DatasetError;

/// An ordered sequence of scalars derived from one trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel(Vec<f64>);

impl Channel {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Channel {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl std::ops::Deref for Channel {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Channel {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// One recorded robot run, stored column-wise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    label: Option<String>,
    timestamps_ms: Vec<f64>,
    vision_x: Vec<f64>,
    vision_y: Vec<f64>,
    vision_w: Vec<f64>,
    motors: [Vec<f64>; 4],
}

impl Trace {
    /// Transpose parsed CSV rows into columns.
    pub fn from_rows(rows: &[TraceRow]) -> Self {
        let n = rows.len();
        let mut trace = Self {
            label: None,
            timestamps_ms: Vec::with_capacity(n),
            vision_x: Vec::with_capacity(n),
            vision_y: Vec::with_capacity(n),
            vision_w: Vec::with_capacity(n),
            motors: std::array::from_fn(|_| Vec::with_capacity(n)),
        };
        for r in rows {
            trace.timestamps_ms.push(r.timestamp_ms);
            trace.vision_x.push(r.vision_x);
            trace.vision_y.push(r.vision_y);
            trace.vision_w.push(r.vision_w);
            for (col, v) in trace.motors.iter_mut().zip([r.m1, r.m2, r.m3, r.m4]) {
                col.push(v);
            }
        }
        trace
    }

    /// Build a trace from columns; all columns must have the timestamp length.
    pub fn from_columns(
        timestamps_ms: Vec<f64>,
        vision_x: Vec<f64>,
        vision_y: Vec<f64>,
        vision_w: Vec<f64>,
        motors: [Vec<f64>; 4],
    ) -> Result<Self, DatasetError> {
        let expected = timestamps_ms.len();
        let columns = [
            ("vision_x", vision_x.len()),
            ("vision_y", vision_y.len()),
            ("vision_w", vision_w.len()),
            ("motor 1", motors[0].len()),
            ("motor 2", motors[1].len()),
            ("motor 3", motors[2].len()),
            ("motor 4", motors[3].len()),
        ];
        for (what, actual) in columns {
            if actual != expected {
                return Err(DatasetError::LengthMismatch {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            label: None,
            timestamps_ms,
            vision_x,
            vision_y,
            vision_w,
            motors,
        })
    }

    /// Attach a source label (usually the file path) used in logs.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.timestamps_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps_ms.is_empty()
    }

    pub fn timestamps_ms(&self) -> &[f64] {
        &self.timestamps_ms
    }

    pub fn vision_x(&self) -> &[f64] {
        &self.vision_x
    }

    pub fn vision_y(&self) -> &[f64] {
        &self.vision_y
    }

    pub fn vision_w(&self) -> &[f64] {
        &self.vision_w
    }

    /// Actuator command columns m1..m4.
    pub fn motors(&self) -> &[Vec<f64>; 4] {
        &self.motors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(t: f64, m: f64) -> TraceRow {
        TraceRow {
            timestamp_ms: t,
            vision_x: t * 0.1,
            vision_y: -t,
            vision_w: 0.5,
            m1: m,
            m2: m + 1.0,
            m3: m + 2.0,
            m4: m + 3.0,
        }
    }

    #[test]
    fn from_rows_transposes() {
        let trace = Trace::from_rows(&[row(0.0, 1.0), row(10.0, 5.0)]);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.timestamps_ms(), &[0.0, 10.0]);
        assert_eq!(trace.vision_y(), &[0.0, -10.0]);
        assert_eq!(trace.motors()[3], vec![4.0, 8.0]);
        assert!(trace.label().is_none());
    }

    #[test]
    fn from_columns_rejects_ragged_columns() {
        let err = Trace::from_columns(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            [vec![0.0, 1.0], vec![0.0], vec![0.0, 1.0], vec![0.0, 1.0]],
        )
        .expect_err("motor 2 is short");
        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                what: "motor 2",
                expected: 2,
                actual: 1
            }
        );
    }
}
