//! asset-fetch
//!
//! Fetches one resource through the compressed-asset interceptor.
//!
//! ```text
//!     asset-fetch index.wasm -o index.wasm
//!         │
//!         ▼
//!  ┌──────────────────┐   index.wasm.gz    ┌───────────┐
//!  │  GzipAssetFetch  │───────────────────▶│ HttpFetch │────▶ static server
//!  │ (allow-list, gz) │◀───────────────────│  (hyper)  │
//!  └────────┬─────────┘  fallback: plain   └───────────┘
//!           ▼
//!     decoded bytes → file / stdout
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use tokio::io::AsyncWriteExt;
use tower::Layer;

use asset_fetch::config::{self, DecompressionStrategy, FetchConfig};
use asset_fetch::fetch::global;
use asset_fetch::observability::logging;
use asset_fetch::{Fetch, GzipAssetLayer, HttpFetch};

#[derive(Parser)]
#[command(name = "asset-fetch")]
#[command(about = "Fetch an asset, preferring its gzip companion", long_about = None)]
struct Cli {
    /// Resource identifier, resolved against the base URL.
    resource: String,

    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override client.base_url.
    #[arg(short, long)]
    base_url: Option<String>,

    /// Override decompression.strategy.
    #[arg(short, long, value_enum)]
    strategy: Option<DecompressionStrategy>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,

    /// Write the body here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => FetchConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.client.base_url = base_url;
    }
    if let Some(strategy) = cli.strategy {
        config.decompression.strategy = strategy;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    config::validation::validate_config(&config)
        .map_err(config::ConfigError::Validation)?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        base_url = %config.client.base_url,
        assets = ?config.assets.files,
        strategy = ?config.decompression.strategy,
        "Configuration loaded"
    );

    let fetch = GzipAssetLayer::from_config(&config).layer(HttpFetch::new(&config.client)?);
    global::install(Arc::new(fetch))?;
    let fetch = global::installed().ok_or("global fetch missing after install")?;

    let response = fetch.fetch(&cli.resource, None).await?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(resource = %cli.resource, status = %status, "Non-success response");
    }

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    tracing::info!(resource = %cli.resource, status = %status, bytes = body.len(), "Fetch complete");

    match cli.output {
        Some(path) => tokio::fs::write(&path, &body).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&body).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
