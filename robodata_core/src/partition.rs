//! Pooling, shuffling and ratio-based train/validation/test partitioning.
//!
//! Sizes are `floor(ratio * pool_size)` per subset, taken in order from one
//! shuffled pool, so the subsets are disjoint. Windows left over after the
//! three subsets are dropped.

use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::assembler::{INPUT_WIDTH, TARGET_WIDTH};
use crate::chunker::{Window, WindowId};
use crate::config::SplitRatios;
use crate::error::DatasetError;
use crate::util::floor_fraction;

/// Windows collected from every trace before shuffling.
#[derive(Debug, Clone, Default)]
pub struct WindowPool {
    window_len: usize,
    traces: usize,
    windows: Vec<Window>,
}

impl WindowPool {
    pub fn new(window_len: usize) -> Self {
        Self {
            window_len,
            traces: 0,
            windows: Vec::new(),
        }
    }

    /// Add the windows of one trace. The trace counts even if it was too
    /// short to produce a window.
    pub fn add_trace(&mut self, windows: impl IntoIterator<Item = Window>) {
        self.traces += 1;
        self.windows.extend(windows);
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn traces(&self) -> usize {
        self.traces
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }
}

/// Subset sizes for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

impl SplitSizes {
    pub fn total(&self) -> usize {
        self.train + self.validation + self.test
    }
}

/// `floor(ratio * pool)` per subset. When the ratios sum above 1 the later
/// subsets are cut down to what is left, so `total() <= pool` always holds.
pub fn split_sizes(pool: usize, ratios: &SplitRatios) -> SplitSizes {
    let train = floor_fraction(ratios.train, pool).min(pool);
    let validation = floor_fraction(ratios.validation, pool).min(pool - train);
    let test = floor_fraction(ratios.test, pool).min(pool - train - validation);
    SplitSizes {
        train,
        validation,
        test,
    }
}

/// RNG used for the pool shuffle.
pub fn shuffle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// A labeled subset of windows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSet {
    window_len: usize,
    windows: Vec<Window>,
}

impl WindowSet {
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.iter().map(Window::id)
    }

    /// Inputs shaped `(windows, window_len, 5)`.
    pub fn input_array(&self) -> Array3<f64> {
        Array3::from_shape_fn(
            (self.windows.len(), self.window_len, INPUT_WIDTH),
            |(w, r, c)| self.windows[w].inputs()[r][c],
        )
    }

    /// Targets shaped `(windows, window_len, 3)`.
    pub fn target_array(&self) -> Array3<f64> {
        Array3::from_shape_fn(
            (self.windows.len(), self.window_len, TARGET_WIDTH),
            |(w, r, c)| self.windows[w].targets()[r][c],
        )
    }

    pub fn to_arrays(&self) -> (Array3<f64>, Array3<f64>) {
        (self.input_array(), self.target_array())
    }
}

/// Counts describing a finished split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub traces: usize,
    pub window_len: usize,
    pub pool: usize,
    pub train: usize,
    pub validation: usize,
    pub test: usize,
    pub dropped: usize,
}

/// Terminal output of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    pub train: WindowSet,
    pub validation: WindowSet,
    pub test: WindowSet,
    traces: usize,
    pool: usize,
}

impl DatasetSplit {
    pub fn summary(&self) -> SplitSummary {
        let used = self.train.len() + self.validation.len() + self.test.len();
        SplitSummary {
            traces: self.traces,
            window_len: self.train.window_len,
            pool: self.pool,
            train: self.train.len(),
            validation: self.validation.len(),
            test: self.test.len(),
            dropped: self.pool - used,
        }
    }
}

/// Shuffle the pool with `rng` and cut it into train/validation/test.
pub fn partition<R: rand::Rng + ?Sized>(
    pool: WindowPool,
    ratios: &SplitRatios,
    rng: &mut R,
) -> Result<DatasetSplit, DatasetError> {
    let WindowPool {
        window_len,
        traces,
        mut windows,
    } = pool;
    if windows.is_empty() {
        return Err(DatasetError::EmptyPool { traces });
    }
    if ratios.sum() > 1.0 {
        tracing::warn!(
            sum = ratios.sum(),
            "split ratios sum above 1; later subsets are truncated"
        );
    }

    let pool_size = windows.len();
    let sizes = split_sizes(pool_size, ratios);
    windows.shuffle(rng);

    let mut rest = windows.into_iter();
    let mut take = |n: usize| WindowSet {
        window_len,
        windows: rest.by_ref().take(n).collect(),
    };
    let train = take(sizes.train);
    let validation = take(sizes.validation);
    let test = take(sizes.test);

    let split = DatasetSplit {
        train,
        validation,
        test,
        traces,
        pool: pool_size,
    };
    let s = split.summary();
    tracing::info!(
        pool = s.pool,
        train = s.train,
        validation = s.validation,
        test = s.test,
        dropped = s.dropped,
        "dataset partitioned"
    );
    Ok(split)
}
