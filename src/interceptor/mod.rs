//! The fetch interceptor.
//!
//! # Data Flow
//! ```text
//! fetch(resource, options)
//!     → resource not allow-listed → inner.fetch(resource, options), untouched
//!     → inner.fetch(resource + ".gz")
//!         → non-success status / network error / unreadable body → fallback
//!         → decompress_if_needed → response
//!     → fallback: inner.fetch(resource)
//!         → non-success status / network error → error to the caller
//!         → response, returned as is
//! ```
//!
//! # Design Decisions
//! - An explicit wrapper; installing it process-wide is the caller's choice
//! - Compressed and fallback requests are plain GETs, caller options are not forwarded
//! - Only the fallback failure reaches the caller

pub mod assets;
pub mod layer;

use std::sync::Arc;
use axum::http::Response;
use axum::body::Body;
use futures_util::future::{BoxFuture, FutureExt};
use tracing::Instrument;
use uuid::Uuid;

use crate::decompress::{self, Decompressor};
use crate::fetch::{ensure_success, Fetch, FetchError, FetchOptions, FetchResult};
use crate::observability::metrics;

pub use assets::AssetSet;
pub use layer::GzipAssetLayer;

/// Fetches allow-listed assets through their gzip companion.
#[derive(Debug, Clone)]
pub struct GzipAssetFetch<F> {
    inner: F,
    assets: AssetSet,
    decompressor: Arc<dyn Decompressor>,
}

impl<F> GzipAssetFetch<F> {
    pub fn new(inner: F, assets: AssetSet, decompressor: Arc<dyn Decompressor>) -> Self {
        Self {
            inner,
            assets,
            decompressor,
        }
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Fetch> GzipAssetFetch<F> {
    async fn fetch_asset(&self, resource: &str) -> FetchResult {
        match self.fetch_compressed(resource).await {
            Ok(response) => {
                metrics::record_fetch("compressed");
                return Ok(response);
            }
            Err(e) => {
                tracing::error!(resource = %resource, error = %e, "Error processing compressed asset");
            }
        }

        tracing::info!(resource = %resource, "Attempting to load uncompressed asset");

        match self.fetch_plain(resource).await {
            Ok(response) => {
                metrics::record_fetch("fallback");
                Ok(response)
            }
            Err(e) => {
                tracing::error!(resource = %resource, error = %e, "Fallback for asset failed");
                metrics::record_fetch("failed");
                Err(e)
            }
        }
    }

    async fn fetch_compressed(&self, resource: &str) -> FetchResult {
        let compressed = self.assets.compressed_name(resource);
        let response = self.inner.fetch(&compressed, None).await?;
        let response = ensure_success(&compressed, response)?;

        decompress::decompress_if_needed(self.decompressor.as_ref(), &compressed, response).await
    }

    async fn fetch_plain(&self, resource: &str) -> Result<Response<Body>, FetchError> {
        let response = self.inner.fetch(resource, None).await?;
        ensure_success(resource, response)
    }
}

impl<F: Fetch> Fetch for GzipAssetFetch<F> {
    fn fetch(&self, resource: &str, options: Option<FetchOptions>) -> BoxFuture<'_, FetchResult> {
        if !self.assets.contains(resource) {
            metrics::record_fetch("passthrough");
            return self.inner.fetch(resource, options);
        }

        let resource = resource.to_string();
        let span = tracing::info_span!("asset_fetch", fetch_id = %Uuid::new_v4(), resource = %resource);
        async move { self.fetch_asset(&resource).await }
            .instrument(span)
            .boxed()
    }
}
