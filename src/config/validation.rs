//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Validation is a pure
//! function `&RelayConfig -> Result<(), Vec<ValidationError>>` and reports
//! every problem it finds, not just the first.

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a host:port address")]
    BindAddress(String),

    #[error("listener.path `{0}` must start with '/'")]
    Path(String),

    #[error("upstream.url `{0}` is not a valid URL")]
    UpstreamUrl(String),

    #[error("upstream.url scheme `{0}` is not http or https")]
    UpstreamScheme(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("upstream.auth_header name `{0}` is not a valid header name")]
    AuthHeaderName(String),

    #[error("upstream.auth_header value is not a valid header value")]
    AuthHeaderValue,
}

/// An IP socket address, or `host:port` to be resolved at bind time.
fn is_bind_address(addr: &str) -> bool {
    if addr.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(|c: char| c.is_whitespace() || c == ':')
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !config.listener.path.starts_with('/') {
        errors.push(ValidationError::Path(config.listener.path.clone()));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UpstreamScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::UpstreamUrl(config.upstream.url.clone())),
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }
    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::Zero("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }

    if let Some(auth) = &config.upstream.auth_header {
        if HeaderName::from_bytes(auth.name.as_bytes()).is_err() {
            errors.push(ValidationError::AuthHeaderName(auth.name.clone()));
        }
        if HeaderValue::from_str(&auth.value).is_err() {
            errors.push(ValidationError::AuthHeaderValue);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
