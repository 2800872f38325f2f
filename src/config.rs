//! Preparation configuration.
//!
//! A single [`PrepConfig`] drives every stage: where the raw files live,
//! how wide the context windows are, where cached artifacts go, and how the
//! random partitioner splits the prepared rows. Configurations serialize to
//! TOML or JSON so an experiment can be reproduced from a checked-in file.
//!
//! # Example
//!
//! ```ignore
//! use pssp_dataset::config::PrepConfig;
//!
//! let config = PrepConfig::default()
//!     .with_window_width(17)
//!     .with_seed(42);
//! config.validate()?;
//! config.save_toml("configs/cullpdb.toml")?;
//! ```

use crate::schema::{DEFAULT_WINDOW_WIDTH, SEQUENCE_LENGTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_window_width() -> usize {
    DEFAULT_WINDOW_WIDTH
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("dataset/cullpdb+profile_6133.npy")
}

fn default_evaluation_path() -> Option<PathBuf> {
    Some(PathBuf::from("dataset/cb513+profile_split1.npy"))
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("dataset")
}

fn default_fraction() -> f64 {
    0.05
}

/// Configuration for a dataset preparation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    /// Context-window width in residues. Must be odd, ≥ 1, and no larger
    /// than the sequence length.
    #[serde(default = "default_window_width")]
    pub window_width: usize,

    /// Primary dataset file (flat `.npy`, N × 700 × 57 values).
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Independent evaluation dataset with the same per-position layout.
    #[serde(
        default = "default_evaluation_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation_path: Option<PathBuf>,

    /// Directory for cached window/label artifacts.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Fraction of rows carved off for the test partition.
    #[serde(default = "default_fraction")]
    pub test_fraction: f64,

    /// Fraction of the remaining rows carved off for validation.
    #[serde(default = "default_fraction")]
    pub validation_fraction: f64,

    /// Seed for the random partitioner. `None` draws from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            dataset_path: default_dataset_path(),
            evaluation_path: default_evaluation_path(),
            cache_dir: default_cache_dir(),
            test_fraction: 0.05,
            validation_fraction: 0.05,
            seed: None,
        }
    }
}

impl PrepConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context-window width.
    pub fn with_window_width(mut self, width: usize) -> Self {
        self.window_width = width;
        self
    }

    /// Set the primary dataset path.
    pub fn with_dataset_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dataset_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the evaluation dataset path.
    pub fn with_evaluation_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.evaluation_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cache_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the partitioner seed for reproducible splits.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set both split fractions.
    pub fn with_fractions(mut self, test: f64, validation: f64) -> Self {
        self.test_fraction = test;
        self.validation_fraction = validation;
        self
    }

    /// Validate the configuration.
    ///
    /// Returns Ok(()) if valid, Err(msg) otherwise. Called before any
    /// computation so bad parameters never reach the transform stages.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 {
            return Err("window_width must be > 0".to_string());
        }
        if self.window_width % 2 == 0 {
            return Err(format!(
                "window_width must be odd (a window needs a center residue), got {}",
                self.window_width
            ));
        }
        if self.window_width > SEQUENCE_LENGTH {
            return Err(format!(
                "window_width ({}) must be <= sequence length ({})",
                self.window_width, SEQUENCE_LENGTH
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            ));
        }
        if !(self.validation_fraction > 0.0 && self.validation_fraction < 1.0) {
            return Err(format!(
                "validation_fraction must be in (0, 1), got {}",
                self.validation_fraction
            ));
        }
        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: PrepConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: PrepConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}
