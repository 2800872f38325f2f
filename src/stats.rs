//! Label distribution diagnostics.
//!
//! Summarizes a flattened label array into per-class totals and
//! proportions. Used by the inspection tool to sanity-check a prepared
//! dataset before training: a wildly skewed or empty class usually means
//! the wrong file or a stale cache.

use crate::schema::{CLASS_NAMES, STRUCTURE_CLASSES};
use ndarray::{Array2, Axis};
use std::fmt;

/// Per-class totals and proportions of a flattened label array.
#[derive(Debug, Clone)]
pub struct LabelDistribution {
    /// Sum of each label column (row count per class for one-hot labels).
    pub counts: Vec<f64>,
    /// Column sums divided by the row count.
    pub fractions: Vec<f64>,
    /// Number of label rows summarized.
    pub rows: usize,
}

impl LabelDistribution {
    /// Summarize a `(M, C)` label array.
    pub fn from_labels(labels: &Array2<f64>) -> Self {
        let rows = labels.len_of(Axis(0));
        let counts: Vec<f64> = labels.sum_axis(Axis(0)).to_vec();
        let fractions = if rows == 0 {
            vec![0.0; counts.len()]
        } else {
            counts.iter().map(|c| c / rows as f64).collect()
        };
        Self {
            counts,
            fractions,
            rows,
        }
    }

    /// Index of the most frequent class, if any rows were summarized.
    pub fn dominant_class(&self) -> Option<usize> {
        if self.rows == 0 {
            return None;
        }
        self.counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

impl fmt::Display for LabelDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Label distribution over {} rows:", self.rows)?;
        for (i, (count, fraction)) in self.counts.iter().zip(&self.fractions).enumerate() {
            let name = if i < STRUCTURE_CLASSES {
                CLASS_NAMES[i]
            } else {
                "?"
            };
            writeln!(f, "  {name:>2}: {count:>12.0}  ({:.4})", fraction)?;
        }
        Ok(())
    }
}
