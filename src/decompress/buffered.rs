//! Whole-buffer gzip decoding.

use std::io::Read;
use axum::body::{Body, Bytes};
use flate2::read::MultiGzDecoder;

use crate::decompress::{DecompressError, Decompressor};

/// Decodes the complete buffer in one synchronous pass, every gzip member included.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferedGunzip;

impl BufferedGunzip {
    /// Decode `compressed` into a new buffer.
    pub fn decode(compressed: &[u8]) -> Result<Vec<u8>, DecompressError> {
        let mut decoder = MultiGzDecoder::new(compressed);
        let mut out = Vec::with_capacity(compressed.len().saturating_mul(2));
        decoder.read_to_end(&mut out)?;
        Ok(out)
    }
}

impl Decompressor for BufferedGunzip {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn decompress(&self, compressed: Bytes) -> Result<Body, DecompressError> {
        Self::decode(&compressed).map(Body::from)
    }
}
