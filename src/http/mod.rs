//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → cors.rs (CORS headers, preflight short-circuit)
//!     → relay.rs (validate, buffer, forward, relay)
//!         → headers.rs (curate forwarded headers)
//!         → error.rs (map failures to status + message)
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod headers;
pub mod relay;
pub mod server;

pub use error::RelayError;
pub use headers::ForwardedHeaders;
pub use server::{build_router, AppState, RelayServer, X_REQUEST_ID};
