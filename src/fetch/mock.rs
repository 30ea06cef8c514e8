//! In-memory [`Fetch`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};
use futures_util::future::{BoxFuture, FutureExt};

use crate::fetch::{Fetch, FetchError, FetchOptions, FetchResult};

enum Reply {
    Respond {
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    },
    Refuse,
}

/// Answers from a fixed table and records every call.
/// Unknown resources answer 404.
#[derive(Default)]
pub struct MockFetch {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, Option<FetchOptions>)>>,
}

impl MockFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, resource: &str, status: StatusCode, body: impl Into<Bytes>) -> Self {
        self.replies.insert(
            resource.to_string(),
            Reply::Respond {
                status,
                headers: HeaderMap::new(),
                body: body.into(),
            },
        );
        self
    }

    pub fn reply_with_header(
        mut self,
        resource: &str,
        header: (&'static str, &'static str),
        body: impl Into<Bytes>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(header.0),
            HeaderValue::from_static(header.1),
        );
        self.replies.insert(
            resource.to_string(),
            Reply::Respond {
                status: StatusCode::OK,
                headers,
                body: body.into(),
            },
        );
        self
    }

    /// Fail `resource` with a network error.
    pub fn refuse(mut self, resource: &str) -> Self {
        self.replies.insert(resource.to_string(), Reply::Refuse);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<FetchOptions>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requested(&self) -> Vec<String> {
        self.calls().into_iter().map(|(resource, _)| resource).collect()
    }
}

impl Fetch for MockFetch {
    fn fetch(&self, resource: &str, options: Option<FetchOptions>) -> BoxFuture<'_, FetchResult> {
        self.calls.lock().unwrap().push((resource.to_string(), options));

        let result = match self.replies.get(resource) {
            Some(Reply::Respond { status, headers, body }) => {
                let mut response = Response::new(Body::from(body.clone()));
                *response.status_mut() = *status;
                *response.headers_mut() = headers.clone();
                Ok(response)
            }
            Some(Reply::Refuse) => Err(FetchError::Network {
                resource: resource.to_string(),
                source: "connection refused".into(),
            }),
            None => {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::NOT_FOUND;
                Ok(response)
            }
        };

        async move { result }.boxed()
    }
}
