//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Asset {
    status: StatusCode,
    content_encoding: Option<&'static str>,
    body: Bytes,
}

/// A static file server with a fixed table of paths.
/// Unknown paths answer 404. Every requested path is recorded.
#[derive(Default)]
pub struct AssetServer {
    assets: HashMap<String, Asset>,
    hits: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl AssetServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, path: &str, body: impl Into<Bytes>) -> Self {
        self.status(path, StatusCode::OK, body)
    }

    pub fn status(mut self, path: &str, status: StatusCode, body: impl Into<Bytes>) -> Self {
        self.assets.insert(
            path.to_string(),
            Asset {
                status,
                content_encoding: None,
                body: body.into(),
            },
        );
        self
    }

    pub fn encoded(mut self, path: &str, encoding: &'static str, body: impl Into<Bytes>) -> Self {
        self.assets.insert(
            path.to_string(),
            Asset {
                status: StatusCode::OK,
                content_encoding: Some(encoding),
                body: body.into(),
            },
        );
        self
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port. Returns the base URL.
    pub async fn start(self: Arc<Self>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let app = Router::new().fallback(serve_asset).with_state(self);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{}/", addr)
    }
}

async fn serve_asset(State(server): State<Arc<AssetServer>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    server.hits.lock().unwrap().push(path.clone());

    match server.assets.get(&path) {
        Some(asset) => {
            let mut response = Response::new(Body::from(asset.body.clone()));
            *response.status_mut() = asset.status;
            if let Some(encoding) = asset.content_encoding {
                response
                    .headers_mut()
                    .insert(header::CONTENT_ENCODING, encoding.parse().unwrap());
            }
            response
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Gzip `data` the way the packing tool does.
#[allow(dead_code)]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    use std::io::Write;
    use flate2::{write::GzEncoder, Compression};

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
