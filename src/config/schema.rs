//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every default matches the relay's historical fixed constants, so an
//! empty config file reproduces the original deployment.

use serde::{Deserialize, Serialize};

/// Upstream ingestion endpoint used when none is configured.
pub const DEFAULT_UPSTREAM_URL: &str = "https://stacks.targetr.net/upload";

/// Maximum accepted upload size (100 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Root configuration for the upload relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, route path).
    pub listener: ListenerConfig,

    /// Upstream ingestion endpoint.
    pub upstream: UpstreamConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5001").
    pub bind_address: String,

    /// Path the relay endpoint is mounted on.
    pub path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5001".to_string(),
            path: "/upload-go".to_string(),
        }
    }
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute URL uploads are POSTed to.
    pub url: String,

    /// Total request timeout in seconds. Unset means the transport default (none).
    pub timeout_secs: Option<u64>,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: Option<u64>,

    /// Honour HTTP_PROXY / HTTPS_PROXY from the environment.
    pub use_system_proxy: bool,

    /// Fixed credential header attached to every outbound request.
    pub auth_header: Option<AuthHeaderConfig>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: None,
            connect_timeout_secs: None,
            use_system_proxy: true,
            auth_header: None,
        }
    }
}

/// A single static header used to authenticate against the upstream.
#[derive(Clone, Deserialize, Serialize, PartialEq)]
pub struct AuthHeaderConfig {
    pub name: String,
    pub value: String,
}

impl std::fmt::Debug for AuthHeaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaderConfig")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body buffered before rejecting with 413.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "upload_relay=info,tower_http=info".to_string(),
            json_logs: false,
        }
    }
}
