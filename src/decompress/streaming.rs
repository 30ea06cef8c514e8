//! Incremental gzip decoding.
//!
//! The compressed bytes are fed through the decoder one chunk at a time.
//! Multi-member input is decoded member after member. When the whole
//! compressed body is already in memory the chunks are decoded before the
//! response is handed out, so a corrupt or truncated body is reported to the
//! caller of [`Decompressor::decompress`] instead of the body reader.

use std::io::{self, Write};
use axum::body::{Body, Bytes};
use flate2::write::MultiGzDecoder;
use futures_util::{future, stream, Stream, StreamExt, TryStreamExt};

use crate::decompress::{DecompressError, Decompressor};

/// Decodes chunk by chunk and serves the decoded chunks as the body.
#[derive(Debug, Clone, Copy)]
pub struct StreamingGunzip {
    chunk_size: usize,
}

impl StreamingGunzip {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Decompressor for StreamingGunzip {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn decompress(&self, compressed: Bytes) -> Result<Body, DecompressError> {
        if flate2::bufread::GzDecoder::new(&compressed[..]).header().is_none() {
            return Err(DecompressError::InvalidHeader);
        }

        let mut decoder = GunzipChunks::new();
        let mut decoded = Vec::new();
        for chunk in chunks(compressed, self.chunk_size) {
            decoded.push(decoder.feed(&chunk)?);
        }
        decoded.push(decoder.finish()?);
        decoded.retain(|chunk| !chunk.is_empty());

        Ok(Body::from_stream(stream::iter(decoded.into_iter().map(Ok::<_, io::Error>))))
    }
}

/// Incremental multi-member gzip decoder over byte chunks.
pub struct GunzipChunks {
    decoder: MultiGzDecoder<Vec<u8>>,
}

impl GunzipChunks {
    pub fn new() -> Self {
        Self {
            decoder: MultiGzDecoder::new(Vec::new()),
        }
    }

    /// Decode one input chunk, returning whatever plaintext it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> io::Result<Bytes> {
        self.decoder.write_all(chunk)?;
        Ok(self.drain())
    }

    /// Flush the decoder and check the trailer (CRC and length) of the last member.
    pub fn finish(&mut self) -> io::Result<Bytes> {
        self.decoder.try_finish()?;
        Ok(self.drain())
    }

    fn drain(&mut self) -> Bytes {
        Bytes::from(std::mem::take(self.decoder.get_mut()))
    }
}

impl Default for GunzipChunks {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `bytes` into zero-copy slices of at most `size` bytes.
fn chunks(bytes: Bytes, size: usize) -> impl Iterator<Item = Bytes> {
    let len = bytes.len();
    (0..len)
        .step_by(size)
        .map(move |start| bytes.slice(start..(start + size).min(len)))
}

/// Decode a stream of gzip chunks into a stream of plaintext chunks.
///
/// Empty output chunks are skipped. Errors surface on the stream as they are
/// found, the trailer check happens once the input ends.
pub fn gunzip_stream<S>(input: S) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static
where
    S: Stream<Item = io::Result<Bytes>> + Send + 'static,
{
    let mut decoder = GunzipChunks::new();

    input
        .map(Some)
        .chain(stream::iter([None]))
        .map(move |item| -> io::Result<Bytes> {
            match item {
                Some(Ok(chunk)) => decoder.feed(&chunk),
                Some(Err(e)) => Err(e),
                None => decoder.finish(),
            }
        })
        .try_filter(|chunk| future::ready(!chunk.is_empty()))
}
