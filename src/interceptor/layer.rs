//! Tower layer that wraps a [`Fetch`] in the interceptor.

use std::sync::Arc;
use tower::Layer;

use crate::config::FetchConfig;
use crate::decompress::{self, Decompressor};
use crate::interceptor::{AssetSet, GzipAssetFetch};

/// Builds [`GzipAssetFetch`] around any fetch.
///
/// The decompression strategy is resolved when the layer is created and shared
/// by every service it produces.
#[derive(Debug, Clone)]
pub struct GzipAssetLayer {
    assets: AssetSet,
    decompressor: Arc<dyn Decompressor>,
}

impl GzipAssetLayer {
    pub fn new(assets: AssetSet, decompressor: Arc<dyn Decompressor>) -> Self {
        Self { assets, decompressor }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(
            AssetSet::from_config(&config.assets),
            decompress::select(&config.decompression),
        )
    }
}

impl<F> Layer<F> for GzipAssetLayer {
    type Service = GzipAssetFetch<F>;

    fn layer(&self, inner: F) -> Self::Service {
        GzipAssetFetch::new(inner, self.assets.clone(), self.decompressor.clone())
    }
}
