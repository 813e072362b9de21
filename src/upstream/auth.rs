//! Upstream credential injection.
//!
//! The relay attaches no credentials unless configured to. Deployments that
//! need them implement [`UpstreamCredentials`] or configure a static header.

use axum::http::header::{InvalidHeaderName, InvalidHeaderValue};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::AuthHeaderConfig;
use crate::http::RelayError;

/// Adds credentials to an outbound upload request.
pub trait UpstreamCredentials: Send + Sync + 'static {
    fn apply(&self, headers: &mut HeaderMap) -> Result<(), RelayError>;
}

/// Attaches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl UpstreamCredentials for NoCredentials {
    fn apply(&self, _headers: &mut HeaderMap) -> Result<(), RelayError> {
        Ok(())
    }
}

/// A configured credential header that cannot be sent.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid header name: {0}")]
    Name(#[from] InvalidHeaderName),

    #[error("invalid header value: {0}")]
    Value(#[from] InvalidHeaderValue),
}

/// Attaches one fixed header, e.g. `Authorization: Basic ...`.
#[derive(Debug, Clone)]
pub struct StaticHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl StaticHeader {
    pub fn new(name: HeaderName, mut value: HeaderValue) -> Self {
        value.set_sensitive(true);
        Self { name, value }
    }
}

impl TryFrom<&AuthHeaderConfig> for StaticHeader {
    type Error = CredentialError;

    fn try_from(config: &AuthHeaderConfig) -> Result<Self, Self::Error> {
        let name = HeaderName::from_bytes(config.name.as_bytes())?;
        let value = HeaderValue::from_str(&config.value)?;
        Ok(Self::new(name, value))
    }
}

impl UpstreamCredentials for StaticHeader {
    fn apply(&self, headers: &mut HeaderMap) -> Result<(), RelayError> {
        headers.insert(self.name.clone(), self.value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    #[test]
    fn no_credentials_leaves_headers_untouched() {
        let mut headers = HeaderMap::new();
        NoCredentials.apply(&mut headers).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn static_header_is_sensitive() {
        let config = AuthHeaderConfig {
            name: "Authorization".into(),
            value: "Basic dXNlcjpwYXNz".into(),
        };
        let creds = StaticHeader::try_from(&config).unwrap();

        let mut headers = HeaderMap::new();
        creds.apply(&mut headers).unwrap();

        assert_eq!(headers[AUTHORIZATION], "Basic dXNlcjpwYXNz");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn invalid_static_header_is_rejected() {
        let config = AuthHeaderConfig {
            name: "Not A Header".into(),
            value: "x".into(),
        };
        assert!(matches!(
            StaticHeader::try_from(&config),
            Err(CredentialError::Name(_))
        ));

        let config = AuthHeaderConfig {
            name: "Authorization".into(),
            value: "line\nbreak".into(),
        };
        assert!(matches!(
            StaticHeader::try_from(&config),
            Err(CredentialError::Value(_))
        ));
    }
}
