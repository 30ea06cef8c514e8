//! Build-side asset packing.
//!
//! # Data Flow
//! ```text
//! export directory
//!     → compress.rs (discover *.wasm / *.pck, write <name>.gz next to each)
//!     → manifest.rs (write the asset list into the TOML config)
//!     → PackReport (printed as JSON by asset-compress)
//! ```
//!
//! # Design Decisions
//! - Existing compressed files are never overwritten
//! - One failing file does not abort the run; it is reported instead
//! - The config file is rewritten only when the asset list changes

pub mod compress;
pub mod manifest;

use std::path::{Path, PathBuf};
use serde::Serialize;
use thiserror::Error;

pub use compress::{compress_asset, compress_all, discover_assets, CompressOutcome, DEFAULT_EXTENSIONS};
pub use manifest::{update_asset_list, ManifestUpdate};

/// Errors raised while packing assets.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("directory {0} not found")]
    MissingDirectory(PathBuf),

    #[error("input file {0} not found")]
    MissingInput(PathBuf),

    #[error("no permission to write {0}")]
    PermissionDenied(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl PackError {
    /// Classify an I/O error the way the packing report names it.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => PackError::MissingInput(path),
            std::io::ErrorKind::PermissionDenied => PackError::PermissionDenied(path),
            _ => PackError::Io { path, source },
        }
    }
}

/// A file that could not be compressed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PackFailure {
    pub file: String,
    pub error: String,
}

/// Summary of one packing run.
#[derive(Debug, Clone, Serialize, Default)]
pub struct PackReport {
    pub assets: Vec<String>,
    pub compressed: Vec<CompressOutcome>,
    pub skipped: Vec<String>,
    pub failed: Vec<PackFailure>,
    pub manifest: Option<ManifestUpdate>,
}

impl PackReport {
    /// Message describing the failed files, `None` when every file was handled.
    pub fn failure_summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            None
        } else {
            Some(format!("{} asset(s) failed to compress", self.failed.len()))
        }
    }
}

/// `config` as given when absolute, otherwise relative to `source_dir`.
pub fn resolve_config_path(source_dir: &Path, config: &Path) -> PathBuf {
    if config.is_absolute() {
        config.to_path_buf()
    } else {
        source_dir.join(config)
    }
}

/// Compress every matching asset in `source_dir` and record the asset list in
/// the config at `config` (resolved with [`resolve_config_path`]).
///
/// An empty directory yields an empty report and leaves the config alone.
pub fn run(
    source_dir: &Path,
    config: &Path,
    extensions: &[&str],
    suffix: &str,
) -> Result<PackReport, PackError> {
    let assets = discover_assets(source_dir, extensions)?;
    if assets.is_empty() {
        tracing::warn!(dir = %source_dir.display(), extensions = ?extensions, "No matching assets found");
        return Ok(PackReport::default());
    }

    let mut report = compress_all(source_dir, &assets, suffix);
    report.manifest = Some(update_asset_list(&resolve_config_path(source_dir, config), &assets)?);
    Ok(report)
}
