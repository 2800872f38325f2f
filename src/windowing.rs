//! Context-window expansion and label flattening.
//!
//! The heart of the preparation pipeline. Each residue position becomes one
//! training row: a fixed-width window of consecutive profile vectors
//! centered on that position, zero-padded at the sequence boundaries.
//! Windows that fall mostly inside padding (the synthetic edge padding or
//! the all-zero tail positions of proteins shorter than 700 residues) are
//! dropped, and the matching label rows are dropped with them.
//!
//! # Keep rule
//!
//! A window survives iff its count of non-zero scalars exceeds
//! `(width / 2) × alphabet`. This is a whole-window density heuristic, not
//! a center-position check; the two differ at sequence boundaries, and the
//! heuristic is the one cached artifacts and downstream models were built
//! against. Do not "simplify" it.
//!
//! # Alignment
//!
//! [`window_dataset`] derives the keep mask once and applies it to both the
//! feature windows and the flattened labels, so row `i` of both outputs
//! always refers to the same (sample, position) pair. The standalone
//! [`expand_windows`] / [`flatten_labels`] pair reproduces the same rows on
//! well-formed data but relies on the caller to keep the two filters in
//! agreement.
//!
//! # Memory
//!
//! Expansion works one sample at a time against a reused padded buffer, so
//! peak memory is the output plus one `(L + W - 1) × A` scratch array: the
//! full `(N, L, W, A)` intermediate is never materialized.

use crate::error::{DatasetError, Result};
use ndarray::{s, Array2, Array3, Axis};

/// Reject widths that cannot center a window on a position.
fn validate_width(width: usize, positions: usize) -> Result<()> {
    if width == 0 {
        return Err(DatasetError::InvalidConfig(
            "window width must be > 0".to_string(),
        ));
    }
    if width % 2 == 0 {
        return Err(DatasetError::InvalidConfig(format!(
            "window width must be odd (a window needs a center residue), got {width}"
        )));
    }
    if width > positions {
        return Err(DatasetError::InvalidConfig(format!(
            "window width ({width}) exceeds sequence length ({positions})"
        )));
    }
    Ok(())
}

/// Compute the keep decision for every (sample, position) pair.
///
/// The mask is flattened sample-major: entry `s * L + p` answers whether
/// the window centered on position `p` of sample `s` is dense enough to
/// keep. Both [`expand_windows`] and [`window_dataset`] filter by this
/// mask, which is what keeps feature and label rows aligned.
pub fn window_keep_mask(features: &Array3<f64>, width: usize) -> Result<Vec<bool>> {
    let (_, positions, alphabet) = features.dim();
    validate_width(width, positions)?;

    let half = width / 2;
    let threshold = half * alphabet;
    let mut mask = Vec::with_capacity(features.len_of(Axis(0)) * positions);

    // Scratch buffer reused across samples: the edge rows stay zero and the
    // interior is overwritten for each sample.
    let mut padded = Array2::<f64>::zeros((positions + width - 1, alphabet));
    for sample in features.axis_iter(Axis(0)) {
        padded.slice_mut(s![half..half + positions, ..]).assign(&sample);
        for pos in 0..positions {
            let window = padded.slice(s![pos..pos + width, ..]);
            let nonzero = window.iter().filter(|v| **v != 0.0).count();
            mask.push(nonzero > threshold);
        }
    }
    Ok(mask)
}

/// Extract the kept windows into a `(M, W, A)` array.
fn collect_windows(features: &Array3<f64>, width: usize, mask: &[bool]) -> Result<Array3<f64>> {
    let (_, positions, alphabet) = features.dim();
    let half = width / 2;
    let kept = mask.iter().filter(|keep| **keep).count();

    let mut flat = Vec::with_capacity(kept * width * alphabet);
    let mut padded = Array2::<f64>::zeros((positions + width - 1, alphabet));
    for (s, sample) in features.axis_iter(Axis(0)).enumerate() {
        padded.slice_mut(s![half..half + positions, ..]).assign(&sample);
        for pos in 0..positions {
            if mask[s * positions + pos] {
                flat.extend(padded.slice(s![pos..pos + width, ..]).iter().copied());
            }
        }
    }
    Ok(Array3::from_shape_vec((kept, width, alphabet), flat)?)
}

/// Expand features `(N, L, A)` into context windows `(M, W, A)`.
///
/// One window per original position, in (sample ascending, position
/// ascending) order, minus the windows the keep rule discards. `M ≤ N·L`,
/// with equality only when no window is mostly padding.
pub fn expand_windows(features: &Array3<f64>, width: usize) -> Result<Array3<f64>> {
    let mask = window_keep_mask(features, width)?;
    collect_windows(features, width, &mask)
}

/// Flatten labels `(N, L, C)` into one row per non-padding position.
///
/// Rows that are entirely zero carry no structure assignment (padding
/// positions) and are removed. Kept rows stay in flattened order.
pub fn flatten_labels(labels: &Array3<f64>) -> Array2<f64> {
    let (_, _, classes) = labels.dim();
    let mut flat = Vec::new();
    let mut kept = 0;
    for sample in labels.axis_iter(Axis(0)) {
        for row in sample.axis_iter(Axis(0)) {
            if row.iter().any(|v| *v != 0.0) {
                flat.extend(row.iter().copied());
                kept += 1;
            }
        }
    }
    Array2::from_shape_vec((kept, classes), flat)
        .expect("kept row count matches collected values")
}

/// Window features and flatten labels with a single shared keep mask.
///
/// This is the transform the cache and pipeline paths use. The mask is
/// derived once from the feature windows and applied identically to both
/// outputs, so the row alignment between windows and labels holds by
/// construction rather than by two filters happening to agree.
pub fn window_dataset(
    features: &Array3<f64>,
    labels: &Array3<f64>,
    width: usize,
) -> Result<(Array3<f64>, Array2<f64>)> {
    let (f_samples, f_positions, _) = features.dim();
    let (l_samples, l_positions, classes) = labels.dim();
    if f_samples != l_samples || f_positions != l_positions {
        return Err(DatasetError::InvalidConfig(format!(
            "features ({f_samples} samples × {f_positions} positions) and labels \
             ({l_samples} × {l_positions}) do not describe the same sequences"
        )));
    }

    let mask = window_keep_mask(features, width)?;
    let windows = collect_windows(features, width, &mask)?;

    let kept = mask.iter().filter(|keep| **keep).count();
    let mut flat = Vec::with_capacity(kept * classes);
    for (s, sample) in labels.axis_iter(Axis(0)).enumerate() {
        for (pos, row) in sample.axis_iter(Axis(0)).enumerate() {
            if mask[s * l_positions + pos] {
                flat.extend(row.iter().copied());
            }
        }
    }
    let picked = Array2::from_shape_vec((kept, classes), flat)?;

    Ok((windows, picked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    /// Build a single-sample feature array where position `p` holds the
    /// value `fill[p]` in every alphabet slot (dense rows, like profiles).
    fn dense_sample(fill: &[f64], alphabet: usize) -> Array3<f64> {
        let mut x = Array3::<f64>::zeros((1, fill.len(), alphabet));
        for (p, &v) in fill.iter().enumerate() {
            for a in 0..alphabet {
                x[[0, p, a]] = v;
            }
        }
        x
    }

    #[test]
    fn test_window_centering() {
        // Positions [a, b, c, d, e] with width 3: the window at position 2
        // must be [b, c, d].
        let x = dense_sample(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        let windows = expand_windows(&x, 3).unwrap();

        // No padding anywhere, so every position survives
        assert_eq!(windows.dim(), (5, 3, 2));
        assert_eq!(windows[[2, 0, 0]], 2.0);
        assert_eq!(windows[[2, 1, 0]], 3.0);
        assert_eq!(windows[[2, 2, 0]], 4.0);
    }

    #[test]
    fn test_edge_windows_are_zero_padded() {
        let x = dense_sample(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        let windows = expand_windows(&x, 3).unwrap();

        // First window is [pad, a, b]
        assert_eq!(windows[[0, 0, 0]], 0.0);
        assert_eq!(windows[[0, 1, 0]], 1.0);
        // Last window is [d, e, pad]
        assert_eq!(windows[[4, 2, 1]], 0.0);
    }

    #[test]
    fn test_padding_filter_boundary_is_strict() {
        // Width 5: a window with exactly floor(5/2) = 2 dense slots sits on
        // the boundary and must be discarded ("greater than", not ">=").
        let alphabet = 3;
        let x = dense_sample(&[1.0, 1.0, 0.0, 0.0, 0.0], alphabet);
        let windows = expand_windows(&x, 5).unwrap();
        // Every window of this sample sees at most 2 dense rows
        assert_eq!(windows.len_of(Axis(0)), 0);

        // Three dense slots clear the threshold
        let x = dense_sample(&[1.0, 1.0, 1.0, 0.0, 0.0], alphabet);
        let windows = expand_windows(&x, 5).unwrap();
        assert!(windows.len_of(Axis(0)) > 0);
    }

    #[test]
    fn test_window_count_upper_bound() {
        let x = dense_sample(&[1.0, 2.0, 0.0, 0.0, 0.0, 0.0], 2);
        let windows = expand_windows(&x, 3).unwrap();
        assert!(windows.len_of(Axis(0)) <= 6);

        // Fully dense input keeps every position
        let x = dense_sample(&[1.0; 6], 2);
        let windows = expand_windows(&x, 3).unwrap();
        assert_eq!(windows.len_of(Axis(0)), 6);
    }

    #[test]
    fn test_width_validation() {
        let x = dense_sample(&[1.0; 5], 2);
        assert!(matches!(
            expand_windows(&x, 4),
            Err(DatasetError::InvalidConfig(_))
        ));
        assert!(matches!(
            expand_windows(&x, 0),
            Err(DatasetError::InvalidConfig(_))
        ));
        assert!(matches!(
            expand_windows(&x, 7),
            Err(DatasetError::InvalidConfig(_))
        ));
        assert!(expand_windows(&x, 5).is_ok());
    }

    #[test]
    fn test_flatten_labels_drops_zero_rows() {
        let mut y = Array3::<f64>::zeros((2, 3, 4));
        y[[0, 0, 1]] = 1.0;
        y[[0, 2, 3]] = 1.0;
        y[[1, 1, 0]] = 1.0;

        let flat = flatten_labels(&y);
        assert_eq!(flat.dim(), (3, 4));
        // Flattened order: (0,0), (0,2), (1,1)
        assert_eq!(flat[[0, 1]], 1.0);
        assert_eq!(flat[[1, 3]], 1.0);
        assert_eq!(flat[[2, 0]], 1.0);
    }

    #[test]
    fn test_mask_keeps_features_and_labels_aligned() {
        // Sample with a true length of 4 out of 6 positions: the all-zero
        // tail mimics a protein shorter than the fixed sequence length.
        let alphabet = 3;
        let classes = 4;
        let true_len = 4;
        let mut x = Array3::<f64>::zeros((1, 6, alphabet));
        let mut y = Array3::<f64>::zeros((1, 6, classes));
        for p in 0..true_len {
            for a in 0..alphabet {
                x[[0, p, a]] = (p + 1) as f64;
            }
            y[[0, p, p % classes]] = 1.0;
        }

        let (windows, labels) = window_dataset(&x, &y, 3).unwrap();
        assert_eq!(windows.len_of(Axis(0)), labels.len_of(Axis(0)));
        assert_eq!(labels.len_of(Axis(0)), true_len);

        // Row i of both outputs is position i of the sample
        for p in 0..true_len {
            assert_eq!(windows[[p, 1, 0]], (p + 1) as f64, "window center");
            assert_eq!(labels[[p, p % classes]], 1.0, "label row");
        }

        // Independent routines agree on this well-formed input
        let standalone = flatten_labels(&y);
        assert_eq!(standalone.dim(), labels.dim());
    }

    #[test]
    fn test_window_dataset_rejects_mismatched_inputs() {
        let x = Array3::<f64>::zeros((2, 5, 3));
        let y = Array3::<f64>::zeros((3, 5, 4));
        assert!(matches!(
            window_dataset(&x, &y, 3),
            Err(DatasetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_multi_sample_row_order() {
        // Two fully dense samples: rows come out sample-major
        let alphabet = 2;
        let mut x = Array3::<f64>::zeros((2, 3, alphabet));
        x.slice_mut(s![0, .., ..]).fill(1.0);
        x.slice_mut(s![1, .., ..]).fill(2.0);

        let windows = expand_windows(&x, 3).unwrap();
        assert_eq!(windows.len_of(Axis(0)), 6);
        assert_eq!(windows[[0, 1, 0]], 1.0);
        assert_eq!(windows[[3, 1, 0]], 2.0);
    }
}
