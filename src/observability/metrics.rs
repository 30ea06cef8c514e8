//! Metrics collection.
//!
//! # Metrics
//! - `asset_fetch_total` (counter): intercepted fetches by outcome
//!   (`passthrough`, `compressed`, `fallback`, `failed`)
//! - `asset_decode_total` (counter): decode results
//!   (`transport_encoded`, `decompressed`, `identity`, `degraded`)
//! - `asset_decompress_seconds` (histogram): decode time by strategy

use std::time::Instant;

/// Record the outcome of a fetch through the interceptor.
pub fn record_fetch(outcome: &'static str) {
    ::metrics::counter!("asset_fetch_total", "outcome" => outcome).increment(1);
}

/// Record how a compressed response was handled.
pub fn record_decode(result: &'static str) {
    ::metrics::counter!("asset_decode_total", "result" => result).increment(1);
}

/// Record time spent setting up or running a decoder.
pub fn record_decompress(strategy: &'static str, start: Instant) {
    ::metrics::histogram!("asset_decompress_seconds", "strategy" => strategy)
        .record(start.elapsed().as_secs_f64());
}
