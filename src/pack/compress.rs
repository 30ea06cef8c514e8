//! Producing the `.gz` companions.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use flate2::{write::GzEncoder, Compression};
use serde::Serialize;

use crate::pack::{PackError, PackFailure, PackReport};

/// Extensions of the engine module and the packed data file.
pub const DEFAULT_EXTENSIONS: &[&str] = &["wasm", "pck"];

/// Result of compressing one asset.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompressOutcome {
    Compressed {
        file: String,
        output: String,
        input_bytes: u64,
        output_bytes: u64,
    },
    Skipped {
        file: String,
        output: String,
    },
}

/// Regular files directly inside `dir` whose extension is in `extensions`, sorted by name.
pub fn discover_assets(dir: &Path, extensions: &[&str]) -> Result<Vec<String>, PackError> {
    if !dir.is_dir() {
        return Err(PackError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| PackError::from_io(dir, e))?;
    let mut assets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PackError::from_io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if !matches {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            assets.push(name.to_string());
        }
    }

    assets.sort();
    Ok(assets)
}

/// Write `<name><suffix>` next to `dir/name`, unless it already exists.
pub fn compress_asset(dir: &Path, name: &str, suffix: &str) -> Result<CompressOutcome, PackError> {
    let input_path = dir.join(name);
    let output = format!("{}{}", name, suffix);
    let output_path = dir.join(&output);

    if output_path.exists() {
        tracing::info!(input = %input_path.display(), output = %output_path.display(), "Skipping, compressed file already exists");
        return Ok(CompressOutcome::Skipped {
            file: name.to_string(),
            output,
        });
    }

    let input = File::open(&input_path).map_err(|e| PackError::from_io(&input_path, e))?;
    let input_bytes = input
        .metadata()
        .map_err(|e| PackError::from_io(&input_path, e))?
        .len();

    let out_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&output_path)
        .map_err(|e| PackError::from_io(&output_path, e))?;

    let written = write_gzip(BufReader::new(input), BufWriter::new(out_file));
    if let Err(e) = written {
        let _ = fs::remove_file(&output_path);
        return Err(PackError::from_io(&output_path, e));
    }

    let output_bytes = fs::metadata(&output_path)
        .map_err(|e| PackError::from_io(&output_path, e))?
        .len();

    tracing::info!(
        input = %input_path.display(),
        output = %output_path.display(),
        input_bytes,
        output_bytes,
        "Compressed asset"
    );

    Ok(CompressOutcome::Compressed {
        file: name.to_string(),
        output,
        input_bytes,
        output_bytes,
    })
}

fn write_gzip<R: io::Read, W: Write>(mut input: R, output: W) -> io::Result<()> {
    let mut encoder = GzEncoder::new(output, Compression::best());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.flush()
}

/// Compress every asset, collecting outcomes and failures into a report.
pub fn compress_all(dir: &Path, assets: &[String], suffix: &str) -> PackReport {
    let mut report = PackReport {
        assets: assets.to_vec(),
        ..PackReport::default()
    };

    for name in assets {
        match compress_asset(dir, name, suffix) {
            Ok(CompressOutcome::Skipped { file, .. }) => report.skipped.push(file),
            Ok(outcome) => report.compressed.push(outcome),
            Err(e) => {
                tracing::error!(file = %name, error = %e, "Error compressing asset");
                report.failed.push(PackFailure {
                    file: name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
