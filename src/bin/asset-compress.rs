//! asset-compress
//!
//! Writes `<name>.gz` next to every engine module and data pack in an export
//! directory and records the asset list in the asset-fetch configuration.

use std::path::PathBuf;
use clap::Parser;

use asset_fetch::config::AssetConfig;
use asset_fetch::observability::logging;
use asset_fetch::pack::{self, PackReport};

#[derive(Parser)]
#[command(name = "asset-compress")]
#[command(about = "Compress exported assets and update the asset list", long_about = None)]
struct Cli {
    /// Directory with the exported assets.
    #[arg(short, long, default_value = ".")]
    source_dir: PathBuf,

    /// asset-fetch configuration to update, relative to the source directory unless absolute.
    #[arg(short, long, default_value = "asset-fetch.toml")]
    config: PathBuf,

    /// File extensions to compress.
    #[arg(short, long, value_delimiter = ',', default_values = ["wasm", "pck"])]
    extensions: Vec<String>,

    /// Suffix of the compressed files.
    #[arg(long, default_value_t = AssetConfig::default().compressed_suffix)]
    suffix: String,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let extensions: Vec<&str> = cli.extensions.iter().map(String::as_str).collect();
    let report = pack::run(&cli.source_dir, &cli.config, &extensions, &cli.suffix)?;

    print_report(&report)?;
    if let Some(summary) = report.failure_summary() {
        return Err(summary.into());
    }
    Ok(())
}

fn print_report(report: &PackReport) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
