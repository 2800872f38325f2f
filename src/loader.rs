//! Raw dataset loading.
//!
//! The on-disk files are flat NumPy arrays with `N × 700 × 57` values. The
//! loader reshapes them into `(sample, position, feature)` form and slices
//! the two column blocks this crate cares about, the sequence profile and
//! the structure one-hot, into a single normalized `(N, 700, 29)` array.
//! Everything else in the raw layout (amino-acid one-hot, terminal markers,
//! solvent accessibility) is ignored.
//!
//! Files store `f64` or `f32`; `f32` values are widened on load so the rest
//! of the pipeline only ever sees `f64`.

use crate::error::{DatasetError, Result};
use crate::schema::{
    LABEL_COLUMNS, NORMALIZED_FEATURES, PROFILE_COLUMNS, RAW_FEATURES, RESIDUE_TYPES,
    SEQUENCE_LENGTH, STRUCTURE_CLASSES,
};
use ndarray::{s, Array3, ArrayD};
use ndarray_npy::ReadNpyExt;
use std::fs::File;
use std::path::Path;

/// Read a `.npy` file as `f64`, widening from `f32` when necessary.
///
/// The stored dimensionality does not matter (published copies of the
/// dataset ship as both 1-D and 2-D arrays); only the element count does.
fn read_npy_f64(path: &Path) -> Result<ArrayD<f64>> {
    let file = File::open(path)?;
    match ArrayD::<f64>::read_npy(file) {
        Ok(array) => Ok(array),
        Err(f64_err) => {
            let file = File::open(path)?;
            match ArrayD::<f32>::read_npy(file) {
                Ok(array) => Ok(array.mapv(f64::from)),
                Err(_) => Err(f64_err.into()),
            }
        }
    }
}

/// Load a raw dataset file into normalized `(N, 700, 29)` form.
///
/// Columns `[0, 21)` of the output hold the sequence profile, columns
/// `[21, 29)` the structure one-hot. Padding positions are all-zero in
/// both blocks.
///
/// # Errors
///
/// - the file is missing or unreadable
/// - the element count does not divide into whole `700 × 57` samples
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Array3<f64>> {
    let path = path.as_ref();
    let raw = read_npy_f64(path)?;

    let elements = raw.len();
    let per_sample = SEQUENCE_LENGTH * RAW_FEATURES;
    if elements == 0 || elements % per_sample != 0 {
        return Err(DatasetError::BadShape {
            path: path.to_path_buf(),
            elements,
            seq: SEQUENCE_LENGTH,
            features: RAW_FEATURES,
        });
    }
    let samples = elements / per_sample;

    let flat: Vec<f64> = raw.iter().copied().collect();
    let raw = Array3::from_shape_vec((samples, SEQUENCE_LENGTH, RAW_FEATURES), flat)?;

    let mut normalized = Array3::<f64>::zeros((samples, SEQUENCE_LENGTH, NORMALIZED_FEATURES));
    normalized
        .slice_mut(s![.., .., ..RESIDUE_TYPES])
        .assign(&raw.slice(s![.., .., PROFILE_COLUMNS]));
    normalized
        .slice_mut(s![.., .., RESIDUE_TYPES..])
        .assign(&raw.slice(s![.., .., LABEL_COLUMNS]));

    Ok(normalized)
}

/// Split a normalized array into features X `(N, L, 21)` and labels Y
/// `(N, L, 8)` along the feature axis.
///
/// Pure slicing; returns owned copies. Precondition: the last axis holds at
/// least the 29 normalized columns.
pub fn split_features_labels(dataset: &Array3<f64>) -> (Array3<f64>, Array3<f64>) {
    let x = dataset.slice(s![.., .., ..RESIDUE_TYPES]).to_owned();
    let y = dataset
        .slice(s![.., .., RESIDUE_TYPES..RESIDUE_TYPES + STRUCTURE_CLASSES])
        .to_owned();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use ndarray_npy::WriteNpyExt;
    use tempfile::TempDir;

    /// Write a flat raw array for `samples` proteins where position `p` of
    /// sample `s` carries marker values in the profile and label blocks.
    fn write_raw_file(dir: &TempDir, name: &str, samples: usize) -> std::path::PathBuf {
        let mut flat = vec![0.0f64; samples * SEQUENCE_LENGTH * RAW_FEATURES];
        for s in 0..samples {
            for p in 0..SEQUENCE_LENGTH {
                let base = (s * SEQUENCE_LENGTH + p) * RAW_FEATURES;
                flat[base + PROFILE_COLUMNS.start] = 1.0 + s as f64;
                flat[base + LABEL_COLUMNS.start] = 10.0 + p as f64;
            }
        }
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        Array1::from_vec(flat).write_npy(&mut file).unwrap();
        path
    }

    #[test]
    fn test_load_dataset_shapes() {
        let dir = TempDir::new().unwrap();
        let path = write_raw_file(&dir, "raw.npy", 3);

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.dim(), (3, SEQUENCE_LENGTH, NORMALIZED_FEATURES));

        let (x, y) = split_features_labels(&dataset);
        assert_eq!(x.dim(), (3, SEQUENCE_LENGTH, RESIDUE_TYPES));
        assert_eq!(y.dim(), (3, SEQUENCE_LENGTH, STRUCTURE_CLASSES));
    }

    #[test]
    fn test_column_blocks_land_in_place() {
        let dir = TempDir::new().unwrap();
        let path = write_raw_file(&dir, "raw.npy", 2);

        let dataset = load_dataset(&path).unwrap();
        // Raw profile column 35 lands at normalized column 0
        assert_eq!(dataset[[1, 0, 0]], 2.0);
        // Raw label column 22 lands at normalized column 21
        assert_eq!(dataset[[0, 5, RESIDUE_TYPES]], 15.0);
        // Untouched output columns stay zero
        assert_eq!(dataset[[0, 0, 1]], 0.0);
    }

    #[test]
    fn test_indivisible_element_count_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.npy");
        let mut file = File::create(&path).unwrap();
        Array1::from_vec(vec![0.0f64; 1234]).write_npy(&mut file).unwrap();

        match load_dataset(&path) {
            Err(DatasetError::BadShape { elements, .. }) => assert_eq!(elements, 1234),
            other => panic!("expected BadShape, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_dataset(dir.path().join("absent.npy"));
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn test_f32_input_is_widened() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw32.npy");
        let flat = vec![0.5f32; SEQUENCE_LENGTH * RAW_FEATURES];
        let mut file = File::create(&path).unwrap();
        Array1::from_vec(flat).write_npy(&mut file).unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.dim(), (1, SEQUENCE_LENGTH, NORMALIZED_FEATURES));
        assert_eq!(dataset[[0, 0, 0]], 0.5);
    }
}
