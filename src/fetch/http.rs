//! HTTP implementation of [`Fetch`].
//!
//! # Responsibilities
//! - Resolve resource identifiers against the configured base URL
//! - Forward method, headers and body from [`FetchOptions`]
//! - Record the response URL for diagnostics
//!
//! # Design Decisions
//! - Pooled hyper client, shared by every call
//! - Only connection establishment has a deadline; requests do not

use std::time::Duration;
use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response, Uri};
use futures_util::future::{BoxFuture, FutureExt};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use url::Url;

use crate::config::ClientConfig;
use crate::fetch::{Fetch, FetchError, FetchOptions, FetchResult, ResponseUrl};

/// Fetches resources over HTTP relative to a base URL.
#[derive(Clone)]
pub struct HttpFetch {
    client: Client<HttpConnector, Body>,
    base_url: Url,
    user_agent: Option<HeaderValue>,
}

impl HttpFetch {
    /// Create a fetcher from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| FetchError::InvalidResource {
            resource: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(config.connect_timeout_secs.map(Duration::from_secs));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        let user_agent = match HeaderValue::from_str(&config.user_agent) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(user_agent = %config.user_agent, "Ignoring invalid user agent");
                None
            }
        };

        Ok(Self {
            client,
            base_url,
            user_agent,
        })
    }

    /// Base URL resources are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource identifier to an absolute URL.
    pub fn resolve(&self, resource: &str) -> Result<Url, FetchError> {
        self.base_url.join(resource).map_err(|e| FetchError::InvalidResource {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }

    fn build_request(&self, resource: &str, url: &Url, options: FetchOptions) -> Result<Request<Body>, FetchError> {
        let uri: Uri = url.as_str().parse().map_err(|e: axum::http::uri::InvalidUri| {
            FetchError::InvalidResource {
                resource: resource.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut request = Request::builder()
            .method(options.method)
            .uri(uri)
            .body(options.body.map(Body::from).unwrap_or_else(Body::empty))
            .map_err(|e| FetchError::InvalidResource {
                resource: resource.to_string(),
                reason: e.to_string(),
            })?;

        let headers = request.headers_mut();
        for (name, value) in options.headers.iter() {
            headers.append(name.clone(), value.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            headers.entry(header::USER_AGENT).or_insert_with(|| user_agent.clone());
        }

        Ok(request)
    }

    async fn send(&self, resource: String, options: FetchOptions) -> FetchResult {
        let url = self.resolve(&resource)?;
        let request = self.build_request(&resource, &url, options)?;

        tracing::debug!(
            resource = %resource,
            method = %request.method(),
            url = %url,
            "Sending request"
        );

        let response: Response<Incoming> = self
            .client
            .request(request)
            .await
            .map_err(|e| FetchError::Network {
                resource: resource.clone(),
                source: Box::new(e),
            })?;

        tracing::debug!(resource = %resource, status = %response.status(), "Response received");

        let (mut parts, body) = response.into_parts();
        parts.extensions.insert(ResponseUrl(url));
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

impl Fetch for HttpFetch {
    fn fetch(&self, resource: &str, options: Option<FetchOptions>) -> BoxFuture<'_, FetchResult> {
        let resource = resource.to_string();
        self.send(resource, options.unwrap_or_default()).boxed()
    }
}
