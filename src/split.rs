//! Train/validation/test partitioning.
//!
//! Two policies over prepared `(windows, labels)` pairs:
//!
//! - **Random split**: uniform shuffle of row indices, seedable for
//!   reproducibility, applied twice: first carving off the test rows, then
//!   carving validation rows from the remainder.
//! - **Fixed-index split**: the published benchmark subdivision of the
//!   CullPDB 6133 set at sample boundaries (5600 train / 277 test / rest
//!   validation). This split happens at the *sample* level, before window
//!   expansion, so all windows of a protein land in the same partition and
//!   no context leaks across partitions.

use crate::error::{DatasetError, Result};
use crate::loader::split_features_labels;
use crate::windowing::window_dataset;
use ndarray::{s, Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// First benchmark boundary: samples `[0, 5600)` are the training set.
pub const BENCHMARK_TRAIN_SAMPLES: usize = 5600;

/// Second benchmark boundary: samples `[5600, 5877)` are the test set;
/// the remainder is validation.
pub const BENCHMARK_TEST_END: usize = 5877;

/// The six arrays of a three-way partition.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    /// Training windows `(m_train, W, 21)`.
    pub x_train: Array3<f64>,
    /// Validation windows.
    pub x_validation: Array3<f64>,
    /// Test windows.
    pub x_test: Array3<f64>,
    /// Training labels `(m_train, 8)`.
    pub y_train: Array2<f64>,
    /// Validation labels.
    pub y_validation: Array2<f64>,
    /// Test labels.
    pub y_test: Array2<f64>,
}

impl DatasetSplit {
    /// Total row count across the three partitions.
    pub fn total_rows(&self) -> usize {
        self.x_train.len_of(Axis(0))
            + self.x_validation.len_of(Axis(0))
            + self.x_test.len_of(Axis(0))
    }
}

/// Randomly carve `test_fraction` of the rows into a second pair.
///
/// Shuffles row indices with a seedable RNG and moves `ceil(rows ×
/// fraction)` rows to the carved-off side. Returns `(x_rest, x_carved,
/// y_rest, y_carved)`; relative order within each side follows the
/// shuffled index order.
pub fn train_test_split(
    x: &Array3<f64>,
    y: &Array2<f64>,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<(Array3<f64>, Array3<f64>, Array2<f64>, Array2<f64>)> {
    let rows = x.len_of(Axis(0));
    if rows != y.len_of(Axis(0)) {
        return Err(DatasetError::InvalidConfig(format!(
            "windows ({rows} rows) and labels ({} rows) are not aligned",
            y.len_of(Axis(0))
        )));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DatasetError::InvalidConfig(format!(
            "split fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..rows).collect();
    indices.shuffle(&mut rng);

    let carved = (rows as f64 * test_fraction).ceil() as usize;
    let (carved_idx, rest_idx) = indices.split_at(carved);

    Ok((
        x.select(Axis(0), rest_idx),
        x.select(Axis(0), carved_idx),
        y.select(Axis(0), rest_idx),
        y.select(Axis(0), carved_idx),
    ))
}

/// Three-way random partition via two sequential splits.
///
/// Test rows come off the whole set first, then validation rows come off
/// the remainder; both splits use the same seed, so a fixed seed fixes the
/// whole partition.
pub fn split_dataset(
    x: &Array3<f64>,
    y: &Array2<f64>,
    test_fraction: f64,
    validation_fraction: f64,
    seed: Option<u64>,
) -> Result<DatasetSplit> {
    let (x_rest, x_test, y_rest, y_test) = train_test_split(x, y, test_fraction, seed)?;
    let (x_train, x_validation, y_train, y_validation) =
        train_test_split(&x_rest, &y_rest, validation_fraction, seed)?;

    Ok(DatasetSplit {
        x_train,
        x_validation,
        x_test,
        y_train,
        y_validation,
        y_test,
    })
}

/// Slice the unwindowed dataset at the benchmark sample boundaries.
///
/// Returns `(train, test, validation)` views of the normalized `(N, L, 29)`
/// array. The input must hold at least [`BENCHMARK_TEST_END`] samples.
pub fn split_like_paper(
    dataset: &Array3<f64>,
) -> Result<(Array3<f64>, Array3<f64>, Array3<f64>)> {
    let samples = dataset.len_of(Axis(0));
    if samples < BENCHMARK_TEST_END {
        return Err(DatasetError::InvalidConfig(format!(
            "benchmark split needs at least {BENCHMARK_TEST_END} samples, got {samples}"
        )));
    }

    let train = dataset.slice(s![..BENCHMARK_TRAIN_SAMPLES, .., ..]).to_owned();
    let test = dataset
        .slice(s![BENCHMARK_TRAIN_SAMPLES..BENCHMARK_TEST_END, .., ..])
        .to_owned();
    let validation = dataset.slice(s![BENCHMARK_TEST_END.., .., ..]).to_owned();
    Ok((train, test, validation))
}

/// Benchmark partition of a normalized dataset, windowed per partition.
///
/// Splits at the sample boundaries first, then runs feature/label
/// separation and window expansion inside each partition.
pub fn paper_windowed_splits(dataset: &Array3<f64>, width: usize) -> Result<DatasetSplit> {
    let (train, test, validation) = split_like_paper(dataset)?;

    let (x_tr, y_tr) = split_features_labels(&train);
    let (x_te, y_te) = split_features_labels(&test);
    let (x_v, y_v) = split_features_labels(&validation);

    let (x_train, y_train) = window_dataset(&x_tr, &y_tr, width)?;
    let (x_test, y_test) = window_dataset(&x_te, &y_te, width)?;
    let (x_validation, y_validation) = window_dataset(&x_v, &y_v, width)?;

    Ok(DatasetSplit {
        x_train,
        x_validation,
        x_test,
        y_train,
        y_validation,
        y_test,
    })
}
