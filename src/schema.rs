//! Dataset Layout Schema
//!
//! Fixed layout of the CullPDB-style profile datasets this crate consumes.
//! Every raw file is a flat array of `N × 700 × 57` values: 700 residue
//! positions per protein, 57 raw features per position. The constants here
//! must match the published dataset layout exactly: cached artifacts and
//! downstream models depend on them.
//!
//! # Raw feature columns (per position)
//!
//! | Columns | Content |
//! |---------|---------|
//! | `[0, 22)`  | amino-acid one-hot (unused here) |
//! | `[22, 30)` | secondary-structure one-hot (8 classes) |
//! | `[31, 33)` | terminal markers |
//! | `[33, 35)` | solvent accessibility |
//! | `[35, 56)` | sequence profile (21 values) |

use std::ops::Range;

/// Number of residue positions per protein sequence.
///
/// Shorter proteins are padded with all-zero positions up to this length.
pub const SEQUENCE_LENGTH: usize = 700;

/// Raw features per residue position in the on-disk files.
pub const RAW_FEATURES: usize = 57;

/// Width of the per-position profile block (amino-acid alphabet size).
pub const RESIDUE_TYPES: usize = 21;

/// Number of secondary-structure classes.
pub const STRUCTURE_CLASSES: usize = 8;

/// Default context-window width (residues per window). Must be odd.
pub const DEFAULT_WINDOW_WIDTH: usize = 17;

/// Columns of the raw array holding the sequence profile.
pub const PROFILE_COLUMNS: Range<usize> = 35..56;

/// Columns of the raw array holding the structure one-hot.
pub const LABEL_COLUMNS: Range<usize> = 22..30;

/// Secondary-structure class names, in label-column order.
///
/// DSSP 8-state alphabet: loop, bridge, strand, 3-10 helix, pi helix,
/// alpha helix, bend, turn.
pub const CLASS_NAMES: [&str; STRUCTURE_CLASSES] = ["L", "B", "E", "G", "I", "H", "S", "T"];

/// Width of a normalized position vector: profile block plus label block.
pub const NORMALIZED_FEATURES: usize = RESIDUE_TYPES + STRUCTURE_CLASSES;
