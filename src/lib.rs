//! Protein Secondary-Structure Dataset Preparation
//!
//! Turns CullPDB-style profile datasets into classifier-ready arrays:
//! per-residue context windows of sequence-profile vectors, paired with
//! one-hot secondary-structure labels, cached on disk as `.npy` artifacts
//! and partitioned into train/validation/test sets.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       pssp-dataset                             │
//! ├────────────────────────────────────────────────────────────────┤
//! │  schema/     - fixed dataset layout (700 × 57, column blocks)  │
//! │  loader/     - raw .npy loading and feature/label slicing      │
//! │  windowing/  - context-window expansion + label flattening     │
//! │  split/      - random and benchmark partitioning               │
//! │  cache/      - width-keyed .npy artifacts with metadata        │
//! │  pipeline/   - end-to-end preparation facade                   │
//! │  stats/      - label distribution diagnostics                  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pssp_dataset::{Pipeline, PrepConfig};
//!
//! let config = PrepConfig::default().with_window_width(17).with_seed(42);
//! let pipeline = Pipeline::new(config)?;
//!
//! // Cached after the first run
//! let prepared = pipeline.prepare()?;
//! let split = pipeline.split(&prepared)?;
//!
//! println!("{} training rows", split.x_train.len_of(ndarray::Axis(0)));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod prelude;
pub mod schema;
pub mod split;
pub mod stats;
pub mod windowing;

// Re-exports - Configuration
pub use config::PrepConfig;

// Re-exports - Errors
pub use error::{DatasetError, Result};

// Re-exports - Loading
pub use loader::{load_dataset, split_features_labels};

// Re-exports - Windowing
pub use windowing::{expand_windows, flatten_labels, window_dataset, window_keep_mask};

// Re-exports - Splitting
pub use split::{
    paper_windowed_splits, split_dataset, split_like_paper, train_test_split, DatasetSplit,
};

// Re-exports - Cache
pub use cache::{CacheManager, CacheMetadata};

// Re-exports - Pipeline
pub use pipeline::{Pipeline, PreparedDataset};

// Re-exports - Diagnostics
pub use stats::LabelDistribution;
