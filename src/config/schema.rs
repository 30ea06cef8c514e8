//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the asset fetcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Underlying HTTP client settings.
    pub client: ClientConfig,

    /// Assets that are fetched in compressed form.
    pub assets: AssetConfig,

    /// Decompression strategy settings.
    pub decompression: DecompressionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL resource identifiers are resolved against (e.g., "http://127.0.0.1:8060/").
    pub base_url: String,

    /// User-Agent sent when the caller does not set one.
    pub user_agent: String,

    /// Connection establishment timeout in seconds. Requests themselves have no deadline.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8060/".to_string(),
            user_agent: concat!("asset-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: None,
        }
    }
}

/// Allow-list of compressed assets.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Resource identifiers served from a compressed companion.
    pub files: Vec<String>,

    /// Suffix appended to a resource identifier to name its compressed companion.
    pub compressed_suffix: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            files: vec!["index.wasm".to_string(), "index.pck".to_string()],
            compressed_suffix: ".gz".to_string(),
        }
    }
}

/// How gzip bodies are decoded.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecompressionStrategy {
    /// Use the streaming decoder.
    #[default]
    Auto,
    /// Incremental decoding, chunk by chunk.
    Streaming,
    /// Decode the whole buffer in one pass.
    Buffered,
}

/// Decompression configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DecompressionConfig {
    /// Strategy, selected once when the interceptor is built.
    pub strategy: DecompressionStrategy,

    /// Input chunk size for the streaming decoder, in bytes.
    pub chunk_size: usize,
}

impl Default for DecompressionConfig {
    fn default() -> Self {
        Self {
            strategy: DecompressionStrategy::Auto,
            chunk_size: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
