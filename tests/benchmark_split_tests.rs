//! Benchmark (fixed-index) partition tests.
//!
//! The published subdivision of the CullPDB 6133 set slices at sample
//! boundaries 5600 and 5877 *before* any windowing, so every window of a
//! protein stays inside one partition. These tests use scaled-down
//! position axes: the boundaries only concern the sample axis.

use ndarray::{Array3, Axis};
use pssp_dataset::split::{
    paper_windowed_splits, split_like_paper, BENCHMARK_TEST_END, BENCHMARK_TRAIN_SAMPLES,
};
use pssp_dataset::schema::RESIDUE_TYPES;

/// Normalized-layout array (`samples × positions × 29`) where every sample
/// has `true_len` dense-profile positions with one-hot labels.
fn synthetic_normalized(samples: usize, positions: usize, true_len: usize) -> Array3<f64> {
    let mut dataset = Array3::<f64>::zeros((samples, positions, 29));
    for s in 0..samples {
        for p in 0..true_len {
            for a in 0..RESIDUE_TYPES {
                dataset[[s, p, a]] = 0.2 + a as f64 * 1e-2;
            }
            dataset[[s, p, RESIDUE_TYPES + (p % 8)]] = 1.0;
        }
    }
    dataset
}

#[test]
fn test_benchmark_boundaries() {
    let dataset = synthetic_normalized(6000, 4, 3);
    let (train, test, validation) = split_like_paper(&dataset).unwrap();

    assert_eq!(train.len_of(Axis(0)), BENCHMARK_TRAIN_SAMPLES);
    assert_eq!(test.len_of(Axis(0)), BENCHMARK_TEST_END - BENCHMARK_TRAIN_SAMPLES);
    assert_eq!(test.len_of(Axis(0)), 277);
    assert_eq!(validation.len_of(Axis(0)), 6000 - BENCHMARK_TEST_END);
}

#[test]
fn test_benchmark_split_preserves_sample_content() {
    let mut dataset = synthetic_normalized(5900, 4, 3);
    // Tag one sample in each would-be partition
    dataset[[0, 0, 0]] = 111.0;
    dataset[[5600, 0, 0]] = 222.0;
    dataset[[5877, 0, 0]] = 333.0;

    let (train, test, validation) = split_like_paper(&dataset).unwrap();
    assert_eq!(train[[0, 0, 0]], 111.0);
    assert_eq!(test[[0, 0, 0]], 222.0);
    assert_eq!(validation[[0, 0, 0]], 333.0);
}

#[test]
fn test_benchmark_windowed_splits() {
    let true_len = 3;
    let dataset = synthetic_normalized(5900, 6, true_len);
    let split = paper_windowed_splits(&dataset, 3).unwrap();

    // Dense profiles: one window per real position, windowed per partition
    assert_eq!(split.x_train.len_of(Axis(0)), 5600 * true_len);
    assert_eq!(split.x_test.len_of(Axis(0)), 277 * true_len);
    assert_eq!(split.x_validation.len_of(Axis(0)), (5900 - 5877) * true_len);

    // Windows and labels stay aligned inside each partition
    assert_eq!(split.y_train.len_of(Axis(0)), split.x_train.len_of(Axis(0)));
    assert_eq!(split.y_test.len_of(Axis(0)), split.x_test.len_of(Axis(0)));
    assert_eq!(
        split.y_validation.len_of(Axis(0)),
        split.x_validation.len_of(Axis(0))
    );

    assert_eq!(split.x_train.dim().1, 3);
    assert_eq!(split.x_train.dim().2, RESIDUE_TYPES);
}

#[test]
fn test_benchmark_split_rejects_short_datasets() {
    let dataset = synthetic_normalized(5876, 4, 3);
    assert!(split_like_paper(&dataset).is_err());
}
