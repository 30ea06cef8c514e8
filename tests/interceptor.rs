//! End-to-end tests of the interceptor over real HTTP.

use std::sync::Arc;
use axum::body::{Body, Bytes};
use axum::http::{header, Response, StatusCode};
use tower::Layer;
use asset_fetch::config::{DecompressionStrategy, FetchConfig};
use asset_fetch::fetch::{response_url, FetchError};
use asset_fetch::{Fetch, GzipAssetLayer, HttpFetch};

mod common;

use common::{gzip, AssetServer};

fn wasm_payload() -> Vec<u8> {
    let mut payload = b"\0asm\x01\0\0\0".to_vec();
    payload.extend((0..100_000u32).map(|i| (i % 97) as u8));
    payload
}

async fn start(server: AssetServer, strategy: DecompressionStrategy) -> (Arc<AssetServer>, impl Fetch) {
    let server = Arc::new(server);
    let base_url = server.clone().start().await;

    let mut config = FetchConfig::default();
    config.client.base_url = base_url;
    config.decompression.strategy = strategy;

    let fetch = GzipAssetLayer::from_config(&config).layer(HttpFetch::new(&config.client).unwrap());
    (server, fetch)
}

async fn body(response: Response<Body>) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

#[tokio::test]
async fn test_compressed_asset_over_http() {
    let payload = wasm_payload();

    for strategy in [DecompressionStrategy::Streaming, DecompressionStrategy::Buffered] {
        let server = AssetServer::new()
            .file("/index.wasm.gz", gzip(&payload))
            .file("/index.wasm", "should not be requested");
        let (server, fetch) = start(server, strategy).await;

        let response = fetch.fetch("index.wasm", None).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response_url(&response).map(|u| u.path().to_string()),
            Some("/index.wasm.gz".to_string())
        );
        assert_eq!(body(response).await, payload);
        assert_eq!(server.hits(), vec!["/index.wasm.gz"]);
    }
}

#[tokio::test]
async fn test_missing_gz_falls_back_over_http() {
    let server = AssetServer::new().file("/index.pck", "GDPC uncompressed");
    let (server, fetch) = start(server, DecompressionStrategy::Auto).await;

    let response = fetch.fetch("index.pck", None).await.unwrap();
    assert_eq!(body(response).await, "GDPC uncompressed");
    assert_eq!(server.hits(), vec!["/index.pck.gz", "/index.pck"]);
}

#[tokio::test]
async fn test_passthrough_over_http() {
    let server = AssetServer::new()
        .file("/index.html", "<html></html>")
        .file("/index.html.gz", gzip(b"never used"));
    let (server, fetch) = start(server, DecompressionStrategy::Auto).await;

    let response = fetch.fetch("index.html", None).await.unwrap();
    assert_eq!(body(response).await, "<html></html>");

    let missing = fetch.fetch("favicon.ico", None).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    assert_eq!(server.hits(), vec!["/index.html", "/favicon.ico"]);
}

#[tokio::test]
async fn test_content_encoding_gzip_is_untouched() {
    let compressed = gzip(&wasm_payload());
    let server = AssetServer::new().encoded("/index.wasm.gz", "gzip", compressed.clone());
    let (_server, fetch) = start(server, DecompressionStrategy::Auto).await;

    let response = fetch.fetch("index.wasm", None).await.unwrap();
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");
    assert_eq!(body(response).await, compressed);
}

#[tokio::test]
async fn test_uncompressed_gz_body_is_returned_raw() {
    let server = AssetServer::new().file("/index.pck.gz", "GDPC stored without gzip");
    let (server, fetch) = start(server, DecompressionStrategy::Auto).await;

    let response = fetch.fetch("index.pck", None).await.unwrap();
    assert_eq!(body(response).await, "GDPC stored without gzip");
    assert_eq!(server.hits(), vec!["/index.pck.gz"]);
}

#[tokio::test]
async fn test_both_missing_is_an_http_error() {
    let server = AssetServer::new().status("/index.wasm", StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let (server, fetch) = start(server, DecompressionStrategy::Auto).await;

    match fetch.fetch("index.wasm", None).await {
        Err(FetchError::Http { resource, status }) => {
            assert_eq!(resource, "index.wasm");
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("expected HTTP error, got {:?}", other.map(|r| r.status())),
    }
    assert_eq!(server.hits(), vec!["/index.wasm.gz", "/index.wasm"]);
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Bind and drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = FetchConfig::default();
    config.client.base_url = format!("http://{}/", addr);
    let fetch = GzipAssetLayer::from_config(&config).layer(HttpFetch::new(&config.client).unwrap());

    let err = fetch.fetch("index.pck", None).await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }), "got {err}");
    assert_eq!(err.resource(), "index.pck");
}
