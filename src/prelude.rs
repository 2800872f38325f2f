//! Convenience re-exports for the common preparation workflow.
//!
//! ```ignore
//! use pssp_dataset::prelude::*;
//! ```

pub use crate::cache::CacheManager;
pub use crate::config::PrepConfig;
pub use crate::error::{DatasetError, Result};
pub use crate::loader::{load_dataset, split_features_labels};
pub use crate::pipeline::{Pipeline, PreparedDataset};
pub use crate::schema::{
    DEFAULT_WINDOW_WIDTH, RESIDUE_TYPES, SEQUENCE_LENGTH, STRUCTURE_CLASSES,
};
pub use crate::split::{split_dataset, DatasetSplit};
pub use crate::stats::LabelDistribution;
pub use crate::windowing::{expand_windows, flatten_labels, window_dataset};
