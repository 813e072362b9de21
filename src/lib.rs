//! HTTP upload relay library.
//!
//! Accepts a file upload on a single endpoint, forwards the bytes unchanged
//! with a curated header set to an upstream ingestion service, and relays
//! the upstream's answer back to the caller.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use http::{RelayError, RelayServer};
pub use lifecycle::Shutdown;
