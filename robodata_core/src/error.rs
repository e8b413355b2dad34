use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DatasetError {
    /// Sample `index` does not advance past the previous timestamp.
    #[error("degenerate timestamp at index {index} ({timestamp_ms} ms does not advance)")]
    DegenerateTimestamp { index: usize, timestamp_ms: f64 },
    #[error("length mismatch in {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("no windows produced from {traces} trace(s)")]
    EmptyPool { traces: usize },
    #[error("window length must be >= 1")]
    InvalidWindowLength,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
