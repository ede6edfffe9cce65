#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use raggadon::client::{RaggadonClient, Timeouts};

/// Serve `router` on an ephemeral localhost port. Returns the base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Same as [`spawn_server`] for synchronous tests. Keep the runtime alive
/// for as long as the server is needed.
pub fn spawn_server_blocking(router: Router) -> (tokio::runtime::Runtime, String) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let url = rt.block_on(spawn_server(router));
    (rt, url)
}

/// A localhost URL nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Short timeouts so slow-server tests finish quickly.
pub fn fast_timeouts() -> Timeouts {
    Timeouts {
        health: Duration::from_millis(200),
        stats: Duration::from_millis(200),
        request: Duration::from_millis(200),
    }
}

pub fn test_client(url: &str) -> RaggadonClient {
    RaggadonClient::new(url, fast_timeouts()).unwrap()
}
