//! Upload relay binary.
//!
//! ```text
//!     Client ──POST /upload-go──▶ ┌──────────────────────────────┐
//!                                 │ request id → trace span      │
//!                                 │   → CORS (preflight answered)│
//!                                 │   → relay handler            │ ──POST──▶ Upstream
//!     Client ◀──status + body──── │     (buffer, curate headers) │ ◀──────── ingestion
//!                                 └──────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use upload_relay::cli::{render_config, Cli};
use upload_relay::lifecycle::{wait_for_signal, Shutdown};
use upload_relay::observability::init_logging;
use upload_relay::RelayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if cli.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return Err(e.into());
        }
    };

    let server = RelayServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if let Err(e) = wait_for_signal().await {
            tracing::error!(error = %e, "Failed to install signal handler, shutting down");
        }
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
