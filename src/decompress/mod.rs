//! Client-side decompression of fetched assets.
//!
//! # Data Flow
//! ```text
//! Response from the compressed request
//!     → Content-Encoding: gzip? → returned untouched (transport decodes it)
//!     → body read into one buffer
//!     → magic bytes 1F 8B? → Decompressor (streaming.rs | buffered.rs)
//!     → new Response with the decoded body
//!
//! Decoder failure → original response, logged with its URL
//! ```
//!
//! # Design Decisions
//! - Magic-byte sniffing instead of trusting headers: static servers often hand
//!   out pre-gzipped files without declaring an encoding
//! - The strategy is picked once, from configuration, never per call
//! - Decoder failures degrade to the original bytes rather than erroring

pub mod buffered;
pub mod streaming;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Response};
use thiserror::Error;

use crate::config::{DecompressionConfig, DecompressionStrategy};
use crate::fetch::{response_url, FetchError, FetchResult};
use crate::observability::metrics;

pub use buffered::BufferedGunzip;
pub use streaming::StreamingGunzip;

/// The two bytes every gzip member starts with.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Errors raised while decoding a gzip body.
#[derive(Debug, Error)]
pub enum DecompressError {
    #[error("invalid gzip header")]
    InvalidHeader,

    #[error("gzip stream error: {0}")]
    Io(#[from] std::io::Error),
}

/// A gzip decoding strategy.
pub trait Decompressor: Send + Sync + fmt::Debug {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Decode a complete gzip buffer into a response body.
    fn decompress(&self, compressed: Bytes) -> Result<Body, DecompressError>;
}

/// Pick the decoder for this process.
pub fn select(config: &DecompressionConfig) -> Arc<dyn Decompressor> {
    let decompressor: Arc<dyn Decompressor> = match config.strategy {
        DecompressionStrategy::Auto | DecompressionStrategy::Streaming => {
            Arc::new(StreamingGunzip::new(config.chunk_size))
        }
        DecompressionStrategy::Buffered => Arc::new(BufferedGunzip),
    };

    tracing::debug!(
        configured = ?config.strategy,
        strategy = decompressor.name(),
        "Decompression strategy selected"
    );
    decompressor
}

/// True when `bytes` starts with the gzip magic number.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

fn declares_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("gzip"))
}

/// Return `response` with a decoded body.
///
/// A body that is not gzip-framed comes back byte for byte. If decoding fails
/// the original response is returned and the failure is only logged. The only
/// error is a failure to read the body itself.
pub async fn decompress_if_needed(
    decompressor: &dyn Decompressor,
    resource: &str,
    response: Response<Body>,
) -> FetchResult {
    if declares_gzip(response.headers()) {
        tracing::debug!(resource = %resource, "Content-Encoding already gzip, leaving body untouched");
        metrics::record_decode("transport_encoded");
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| FetchError::Body {
            resource: resource.to_string(),
            source: e.into(),
        })?;

    if !is_gzip(&bytes) {
        tracing::debug!(resource = %resource, len = bytes.len(), "Body is not gzip-framed");
        metrics::record_decode("identity");
        return Ok(Response::from_parts(parts, Body::from(bytes)));
    }

    let start = Instant::now();
    match decompressor.decompress(bytes.clone()) {
        Ok(body) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            metrics::record_decompress(decompressor.name(), start);
            metrics::record_decode("decompressed");
            tracing::debug!(
                resource = %resource,
                strategy = decompressor.name(),
                compressed_len = bytes.len(),
                "Asset decompressed"
            );
            Ok(Response::from_parts(parts, body))
        }
        Err(e) => {
            let response = Response::from_parts(parts, Body::from(bytes));
            let url = response_url(&response).map(|u| u.to_string());
            tracing::error!(
                resource = %resource,
                url = url.as_deref().unwrap_or("unknown"),
                strategy = decompressor.name(),
                error = %e,
                "Decompression error, returning original response"
            );
            metrics::record_decode("degraded");
            Ok(response)
        }
    }
}
