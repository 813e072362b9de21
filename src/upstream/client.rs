//! Outbound client for the upstream ingestion endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, StatusCode};
use bytes::Bytes;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::headers::ForwardedHeaders;
use crate::http::RelayError;
use crate::upstream::auth::{CredentialError, NoCredentials, StaticHeader, UpstreamCredentials};

/// Errors raised while constructing the upstream client at startup.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamSetupError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid upstream credentials: {0}")]
    Credentials(#[from] CredentialError),
}

/// A buffered upload ready to be forwarded.
#[derive(Debug, Clone)]
pub struct ForwardedUpload {
    pub headers: ForwardedHeaders,
    pub body: Bytes,
}

/// What the upstream answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Sends uploads to the configured upstream URL.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: Url,
    credentials: Arc<dyn UpstreamCredentials>,
}

impl UpstreamClient {
    /// Build a client from configuration.
    ///
    /// Credentials come from `auth_header` when set; otherwise none are sent.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamSetupError> {
        let url = Url::parse(&config.url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        let credentials: Arc<dyn UpstreamCredentials> = match &config.auth_header {
            Some(auth) => Arc::new(StaticHeader::try_from(auth)?),
            None => Arc::new(NoCredentials),
        };

        Ok(Self {
            client,
            url,
            credentials,
        })
    }

    /// Replace the credential provider.
    pub fn with_credentials(mut self, credentials: Arc<dyn UpstreamCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// POST the upload and buffer the upstream's reply.
    ///
    /// The reply is returned whatever its status; deciding what counts as
    /// success is the caller's job.
    pub async fn forward(&self, upload: ForwardedUpload) -> Result<UpstreamReply, RelayError> {
        let mut headers = upload.headers.into_header_map();
        self.credentials.apply(&mut headers)?;

        let request = self
            .client
            .post(self.url.clone())
            .headers(headers)
            .body(upload.body)
            .build()
            .map_err(|e| RelayError::BuildRequest(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(RelayError::Transport)?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(RelayError::UpstreamRead)?;

        Ok(UpstreamReply {
            status,
            content_type,
            body,
        })
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}
