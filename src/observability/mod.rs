//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware emit tracing events
//!     → per-request span (request_id, method, path) from TraceLayer
//!     → logging.rs subscriber (pretty or JSON on stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Request ID flows through every event of a request

pub mod logging;

pub use logging::init_logging;
