//! Dataset preparation pipeline.
//!
//! Connects the stages end to end:
//!
//! ```text
//! raw .npy → load_dataset → split_features_labels → window_dataset
//!                 ↑                                      ↓
//!           (runs only on                        CacheManager.load_or_build
//!            cache miss)                                 ↓
//!                                          PreparedDataset (windows, labels)
//!                                                        ↓
//!                                     split_dataset → DatasetSplit
//! ```
//!
//! The primary dataset goes through the cache; the evaluation dataset is
//! small enough that it is always prepared from raw. The benchmark
//! partition bypasses the cache entirely because it windows each partition
//! separately.
//!
//! # Example
//!
//! ```ignore
//! use pssp_dataset::{Pipeline, PrepConfig};
//!
//! let pipeline = Pipeline::new(PrepConfig::default().with_seed(42))?;
//! let prepared = pipeline.prepare()?;
//! let split = pipeline.split(&prepared)?;
//! println!("{}", prepared.distribution());
//! ```

use crate::cache::CacheManager;
use crate::config::PrepConfig;
use crate::error::{DatasetError, Result};
use crate::loader::{load_dataset, split_features_labels};
use crate::split::{paper_windowed_splits, split_dataset, DatasetSplit};
use crate::stats::LabelDistribution;
use crate::windowing::window_dataset;
use ndarray::{Array2, Array3, Axis};

/// A prepared dataset: context windows with row-aligned labels.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Context windows `(M, W, 21)`.
    pub windows: Array3<f64>,
    /// One-hot labels `(M, 8)`, row `i` labeling window `i`.
    pub labels: Array2<f64>,
}

impl PreparedDataset {
    /// Number of training rows.
    pub fn len(&self) -> usize {
        self.windows.len_of(Axis(0))
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-class label distribution.
    pub fn distribution(&self) -> LabelDistribution {
        LabelDistribution::from_labels(&self.labels)
    }
}

/// Configured preparation pipeline.
pub struct Pipeline {
    config: PrepConfig,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: PrepConfig) -> Result<Self> {
        config.validate().map_err(DatasetError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Prepare the primary dataset, using cached artifacts when present.
    pub fn prepare(&self) -> Result<PreparedDataset> {
        let cache = CacheManager::new(&self.config.cache_dir, self.config.window_width);
        let source = self.config.dataset_path.to_string_lossy().into_owned();
        let width = self.config.window_width;
        let path = &self.config.dataset_path;

        let (windows, labels) = cache.load_or_build(&source, || {
            log::debug!("cache incomplete, preparing from {}", path.display());
            let dataset = load_dataset(path)?;
            let (x, y) = split_features_labels(&dataset);
            window_dataset(&x, &y, width)
        })?;

        Ok(PreparedDataset { windows, labels })
    }

    /// Prepare the independent evaluation dataset.
    ///
    /// Always computed from raw: evaluation sets are small and a cache
    /// keyed only by width could silently shadow a different file.
    pub fn prepare_evaluation(&self) -> Result<PreparedDataset> {
        let path = self.config.evaluation_path.as_ref().ok_or_else(|| {
            DatasetError::InvalidConfig("no evaluation_path configured".to_string())
        })?;

        let dataset = load_dataset(path)?;
        let (x, y) = split_features_labels(&dataset);
        let (windows, labels) = window_dataset(&x, &y, self.config.window_width)?;
        Ok(PreparedDataset { windows, labels })
    }

    /// Prepare the benchmark partition: fixed sample boundaries, windowed
    /// per partition.
    pub fn prepare_paper_splits(&self) -> Result<DatasetSplit> {
        let dataset = load_dataset(&self.config.dataset_path)?;
        paper_windowed_splits(&dataset, self.config.window_width)
    }

    /// Randomly partition a prepared dataset into train/validation/test.
    pub fn split(&self, prepared: &PreparedDataset) -> Result<DatasetSplit> {
        split_dataset(
            &prepared.windows,
            &prepared.labels,
            self.config.test_fraction,
            self.config.validation_fraction,
            self.config.seed,
        )
    }
}
