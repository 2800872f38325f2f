//! Cached window/label artifacts.
//!
//! Window expansion over the full dataset takes long enough that repeated
//! runs should not pay for it twice. The cache holds the two prepared
//! arrays as `.npy` files plus a JSON sidecar recording the parameters they
//! were built with. Artifact filenames encode the window width, so
//! differently-configured runs never collide on the same files.
//!
//! On load, artifact shapes and sidecar metadata are checked against the
//! configured width and each other; any disagreement is a hard error
//! rather than silently handing a model mismatched data.
//!
//! Plain blocking file I/O with no locking: two processes preparing into
//! the same directory race on artifact creation. This is a single-user
//! offline tool; run one preparation at a time.

use crate::error::{DatasetError, Result};
use crate::schema::{RESIDUE_TYPES, STRUCTURE_CLASSES};
use ndarray::{Array2, Array3, Axis};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Sidecar record of how the cached artifacts were produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Window width the artifacts were built with.
    pub window_width: usize,
    /// Row count of the windows artifact.
    pub window_rows: usize,
    /// Row count of the labels artifact.
    pub label_rows: usize,
    /// Raw file the artifacts were derived from.
    pub source: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Manages the cached artifacts for one (directory, window width) pair.
pub struct CacheManager {
    dir: PathBuf,
    width: usize,
}

impl CacheManager {
    /// Create a manager rooted at `dir` for artifacts of the given width.
    pub fn new<P: AsRef<Path>>(dir: P, width: usize) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            width,
        }
    }

    /// Path of the cached windows artifact.
    pub fn windows_path(&self) -> PathBuf {
        self.dir.join(format!("cached-windows-w{}.npy", self.width))
    }

    /// Path of the cached labels artifact.
    pub fn labels_path(&self) -> PathBuf {
        self.dir.join(format!("cached-labels-w{}.npy", self.width))
    }

    /// Path of the metadata sidecar.
    pub fn metadata_path(&self) -> PathBuf {
        self.dir
            .join(format!("cached-windows-w{}.meta.json", self.width))
    }

    /// Whether both artifacts are present on disk.
    pub fn is_complete(&self) -> bool {
        self.windows_path().exists() && self.labels_path().exists()
    }

    /// Return the cached arrays, building them first if anything is missing.
    ///
    /// When both artifacts exist they are loaded and verified: `build` is
    /// not invoked. When either is missing, `build` runs once; the present
    /// artifact is loaded and trusted as-is, only the missing one is
    /// written, and the sidecar is refreshed.
    pub fn load_or_build<F>(&self, source: &str, build: F) -> Result<(Array3<f64>, Array2<f64>)>
    where
        F: FnOnce() -> Result<(Array3<f64>, Array2<f64>)>,
    {
        let have_windows = self.windows_path().exists();
        let have_labels = self.labels_path().exists();

        if have_windows && have_labels {
            let windows = self.load_windows()?;
            let labels = self.load_labels()?;
            self.verify(&windows, &labels)?;
            self.verify_metadata(&windows, &labels)?;
            return Ok((windows, labels));
        }

        let (built_windows, built_labels) = build()?;

        let windows = if have_windows {
            self.load_windows()?
        } else {
            built_windows
        };
        let labels = if have_labels {
            self.load_labels()?
        } else {
            built_labels
        };

        // Pairing must check out before anything is written.
        self.verify(&windows, &labels)?;
        if !have_windows {
            self.write_windows(&windows)?;
        }
        if !have_labels {
            self.write_labels(&labels)?;
        }
        self.write_metadata(&windows, &labels, source)?;
        Ok((windows, labels))
    }

    fn load_windows(&self) -> Result<Array3<f64>> {
        let path = self.windows_path();
        let file = File::open(&path)?;
        let windows = Array3::<f64>::read_npy(file)?;

        let (_, width, alphabet) = windows.dim();
        if width != self.width || alphabet != RESIDUE_TYPES {
            return Err(DatasetError::StaleCache {
                path,
                reason: format!(
                    "artifact holds {width}-wide windows over {alphabet} residue types, \
                     expected {} × {RESIDUE_TYPES}",
                    self.width
                ),
            });
        }
        Ok(windows)
    }

    fn load_labels(&self) -> Result<Array2<f64>> {
        let path = self.labels_path();
        let file = File::open(&path)?;
        let labels = Array2::<f64>::read_npy(file)?;

        let classes = labels.len_of(Axis(1));
        if classes != STRUCTURE_CLASSES {
            return Err(DatasetError::StaleCache {
                path,
                reason: format!("artifact holds {classes} classes, expected {STRUCTURE_CLASSES}"),
            });
        }
        Ok(labels)
    }

    /// Windows and labels must describe the same rows.
    fn verify(&self, windows: &Array3<f64>, labels: &Array2<f64>) -> Result<()> {
        let window_rows = windows.len_of(Axis(0));
        let label_rows = labels.len_of(Axis(0));
        if window_rows != label_rows {
            return Err(DatasetError::StaleCache {
                path: self.labels_path(),
                reason: format!(
                    "windows hold {window_rows} rows but labels hold {label_rows}; \
                     the artifacts were not built together"
                ),
            });
        }
        Ok(())
    }

    fn verify_metadata(&self, windows: &Array3<f64>, labels: &Array2<f64>) -> Result<()> {
        let path = self.metadata_path();
        if !path.exists() {
            log::warn!(
                "no cache metadata at {}; relying on shape checks alone",
                path.display()
            );
            return Ok(());
        }

        let file = File::open(&path)?;
        let meta: CacheMetadata = serde_json::from_reader(file)?;

        if meta.window_width != self.width {
            return Err(DatasetError::StaleCache {
                path,
                reason: format!(
                    "metadata records window width {}, configured width is {}",
                    meta.window_width, self.width
                ),
            });
        }
        if meta.window_rows != windows.len_of(Axis(0)) || meta.label_rows != labels.len_of(Axis(0))
        {
            return Err(DatasetError::StaleCache {
                path,
                reason: format!(
                    "metadata records {} window rows / {} label rows, artifacts hold {} / {}",
                    meta.window_rows,
                    meta.label_rows,
                    windows.len_of(Axis(0)),
                    labels.len_of(Axis(0))
                ),
            });
        }
        Ok(())
    }

    fn write_windows(&self, windows: &Array3<f64>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.windows_path();
        let mut file = File::create(&path)?;
        windows.write_npy(&mut file)?;
        let (rows, width, alphabet) = windows.dim();
        println!(
            "✅ Cached context windows: {} [{rows} × {width} × {alphabet}]",
            path.display()
        );
        Ok(())
    }

    fn write_labels(&self, labels: &Array2<f64>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.labels_path();
        let mut file = File::create(&path)?;
        labels.write_npy(&mut file)?;
        let (rows, classes) = labels.dim();
        println!(
            "✅ Cached labels: {} [{rows} × {classes}]",
            path.display()
        );
        Ok(())
    }

    fn write_metadata(
        &self,
        windows: &Array3<f64>,
        labels: &Array2<f64>,
        source: &str,
    ) -> Result<()> {
        let meta = CacheMetadata {
            window_width: self.width,
            window_rows: windows.len_of(Axis(0)),
            label_rows: labels.len_of(Axis(0)),
            source: source.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let file = File::create(self.metadata_path())?;
        serde_json::to_writer_pretty(file, &meta)?;
        Ok(())
    }
}
