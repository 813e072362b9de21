//! Upstream ingestion endpoint.
//!
//! # Data Flow
//! ```text
//! relay handler (buffered body + ForwardedHeaders)
//!     → auth.rs (credential provider adds headers, none by default)
//!     → client.rs (POST to upstream URL)
//!     → UpstreamReply (status + buffered body)
//! ```

pub mod auth;
pub mod client;

pub use auth::{CredentialError, NoCredentials, StaticHeader, UpstreamCredentials};
pub use client::{ForwardedUpload, UpstreamClient, UpstreamReply, UpstreamSetupError};
