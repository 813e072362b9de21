//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the relay route
//! - Wire up middleware (tracing, request ID, CORS)
//! - Serve on a bound listener until shutdown

use axum::{
    body::Body,
    http::{HeaderName, Request},
    middleware,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::cors::cors_middleware;
use crate::http::relay::relay_upload;
use crate::upstream::{UpstreamClient, UpstreamSetupError};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, max_body_bytes: usize) -> Self {
        Self {
            upstream,
            max_body_bytes,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamSetupError> {
        Ok(Self::new(
            UpstreamClient::from_config(&config.upstream)?,
            config.limits.max_body_bytes,
        ))
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &RelayConfig, state: AppState) -> Router {
    Router::new()
        .route(&config.listener.path, any(relay_upload))
        .route_layer(middleware::from_fn(cors_middleware))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
}

fn make_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// HTTP server for the upload relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, UpstreamSetupError> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create a server around a prepared state, e.g. one carrying custom
    /// upstream credentials.
    pub fn with_state(config: RelayConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.listener.path,
            upstream = %self.config.upstream.url,
            "Upload relay listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
