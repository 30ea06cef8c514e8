//! Compressed asset fetching.
//!
//! Wraps a fetch implementation so that a small set of large static assets is
//! requested as `<name>.gz`, decoded client-side, and fetched uncompressed
//! when anything on that path fails.

pub mod config;
pub mod decompress;
pub mod fetch;
pub mod interceptor;
pub mod observability;
pub mod pack;

pub use config::FetchConfig;
pub use fetch::{Fetch, FetchError, FetchOptions, HttpFetch};
pub use interceptor::{AssetSet, GzipAssetFetch, GzipAssetLayer};
