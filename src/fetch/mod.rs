//! The fetch abstraction.
//!
//! # Data Flow
//! ```text
//! caller
//!     → Fetch::fetch(resource, options)
//!     → [GzipAssetFetch: allow-listed assets only] (interceptor)
//!     → http.rs (HttpFetch: resolve against base URL, send with hyper client)
//!     → Response<Body> (status is not interpreted here)
//! ```
//!
//! # Design Decisions
//! - Mirrors the platform fetch: a non-success status is a response, not an error
//! - Object safe so stacks can be stored as `Arc<dyn Fetch>`
//! - Each call is independent; no caching or deduplication

pub mod global;
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Response, StatusCode};
use futures_util::future::BoxFuture;
use thiserror::Error;
use url::Url;

pub use http::HttpFetch;

/// Boxed error used for transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a fetch.
pub type FetchResult = Result<Response<Body>, FetchError>;

/// Optional request settings accepted by [`Fetch::fetch`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// URL a response was retrieved from, stored in the response extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseUrl(pub Url);

/// Errors surfaced by a fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP error: {status} for {resource}")]
    Http { resource: String, status: StatusCode },

    /// The request could not be completed.
    #[error("network error for {resource}: {source}")]
    Network {
        resource: String,
        #[source]
        source: BoxError,
    },

    /// The resource identifier could not be turned into a request.
    #[error("invalid resource {resource}: {reason}")]
    InvalidResource { resource: String, reason: String },

    /// The response body could not be read.
    #[error("failed to read body of {resource}: {source}")]
    Body {
        resource: String,
        #[source]
        source: BoxError,
    },
}

impl FetchError {
    /// Resource identifier the error refers to.
    pub fn resource(&self) -> &str {
        match self {
            FetchError::Http { resource, .. }
            | FetchError::Network { resource, .. }
            | FetchError::InvalidResource { resource, .. }
            | FetchError::Body { resource, .. } => resource,
        }
    }
}

/// A fetch-compatible operation: resource identifier plus optional options in,
/// response out.
pub trait Fetch: Send + Sync {
    fn fetch(&self, resource: &str, options: Option<FetchOptions>) -> BoxFuture<'_, FetchResult>;
}

impl<T: Fetch + ?Sized> Fetch for Arc<T> {
    fn fetch(&self, resource: &str, options: Option<FetchOptions>) -> BoxFuture<'_, FetchResult> {
        (**self).fetch(resource, options)
    }
}

impl<T: Fetch + ?Sized> Fetch for Box<T> {
    fn fetch(&self, resource: &str, options: Option<FetchOptions>) -> BoxFuture<'_, FetchResult> {
        (**self).fetch(resource, options)
    }
}

/// Turn a non-success response into [`FetchError::Http`].
pub fn ensure_success(resource: &str, response: Response<Body>) -> FetchResult {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Http {
            resource: resource.to_string(),
            status,
        })
    }
}

/// URL recorded on a response, if the fetch implementation set one.
pub fn response_url<B>(response: &Response<B>) -> Option<&Url> {
    response.extensions().get::<ResponseUrl>().map(|u| &u.0)
}
