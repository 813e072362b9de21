//! Relay error taxonomy and its mapping to HTTP responses.
//!
//! Every failure is terminal for its request. Internal details (transport
//! errors, builder errors) are logged by the handler and never written to
//! the client; only the plain-text message below is.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// Errors that end a relayed request.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Anything other than POST reached the handler.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request carried no bytes.
    #[error("request body is empty")]
    EmptyBody,

    /// The body exceeded the configured limit.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The client body could not be read.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The outbound request could not be constructed.
    #[error("failed to build upstream request: {0}")]
    BuildRequest(String),

    /// The upstream could not be reached.
    #[error("failed to reach upstream: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered but its body could not be read.
    #[error("failed to read upstream response: {0}")]
    UpstreamRead(#[source] reqwest::Error),

    /// The upstream answered with something other than 200.
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, body: Bytes },
}

impl RelayError {
    /// Status code written to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::EmptyBody | RelayError::BodyRead(_) => StatusCode::BAD_REQUEST,
            RelayError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::BuildRequest(_)
            | RelayError::Transport(_)
            | RelayError::UpstreamRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream { status, .. } => *status,
        }
    }

    /// Plain-text body written to the client.
    pub fn client_message(&self) -> String {
        match self {
            RelayError::MethodNotAllowed => "Method not allowed".to_string(),
            RelayError::EmptyBody => "File body is missing or empty.".to_string(),
            RelayError::BodyTooLarge { .. } => "Request body too large".to_string(),
            RelayError::BodyRead(_) => "Error reading request body".to_string(),
            RelayError::BuildRequest(_) | RelayError::Transport(_) => {
                "Internal Server Error during proxy.".to_string()
            }
            RelayError::UpstreamRead(_) => "Error reading upstream response.".to_string(),
            RelayError::Upstream { body, .. } => {
                format!("Upstream error: {}", String::from_utf8_lossy(body))
            }
        }
    }

    /// Whether the failure was caused by the client's request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::MethodNotAllowed
                | RelayError::EmptyBody
                | RelayError::BodyTooLarge { .. }
                | RelayError::BodyRead(_)
        )
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.client_message(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            RelayError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(RelayError::EmptyBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::BodyTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            RelayError::BodyRead("reset".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert!(RelayError::EmptyBody.is_client_error());
        assert!(!RelayError::BuildRequest("bad".into()).is_client_error());
    }

    #[test]
    fn upstream_failure_keeps_status_and_body() {
        let err = RelayError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: Bytes::from_static(b"overloaded"),
        };
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.client_message(), "Upstream error: overloaded");
        assert!(!err.is_client_error());
    }

    #[test]
    fn local_failures_hide_details() {
        let err = RelayError::BuildRequest("invalid header value".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal Server Error during proxy.");
    }

    #[test]
    fn response_is_plain_text() {
        let response = RelayError::EmptyBody.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
