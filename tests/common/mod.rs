//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderMap, StatusCode},
    routing::any,
    Router,
};
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use upload_relay::{RelayConfig, RelayServer, Shutdown};

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A mock upstream that records every request and answers with a fixed reply.
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/upload", self.addr)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// Start a recording mock upstream on an ephemeral port.
pub async fn start_mock_upstream(status: StatusCode, reply: &'static str) -> MockUpstream {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let recorder = captured.clone();

    let app = Router::new()
        .route(
            "/upload",
            any(move |headers: HeaderMap, body: Bytes| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(Captured { headers, body });
                    (status, reply)
                }
            }),
        )
        .layer(DefaultBodyLimit::disable());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, captured }
}

/// Start an upstream that writes `response` verbatim to every connection
/// and then closes it. Returns the upload URL.
pub async fn start_raw_upstream(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                // Drain the request head so the client is not reset mid-write.
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/upload", addr)
}

/// A running relay bound to an ephemeral port.
pub struct RelayHandle {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl RelayHandle {
    pub fn url(&self) -> String {
        format!("http://{}/upload-go", self.addr)
    }
}

/// Relay config pointed at `upstream_url`, ignoring any system proxy.
pub fn relay_config(upstream_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.url = upstream_url.into();
    config.upstream.use_system_proxy = false;
    config
}

pub async fn start_relay(config: RelayConfig) -> RelayHandle {
    start_server(RelayServer::new(config).unwrap()).await
}

pub async fn start_server(server: RelayServer) -> RelayHandle {
    let listener = TcpListener::bind(&server.config().listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let task = tokio::spawn(server.run(listener, rx));

    RelayHandle {
        addr,
        shutdown,
        task,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
