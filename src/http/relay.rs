//! Upload relay handler.
//!
//! # Request lifecycle
//! ```text
//! Received → Validated → Buffered → Forwarded → Relayed
//!                 │           │          │
//!                 └───────────┴──────────┴──────→ Failed
//! ```
//!
//! Each request is independent. The body is buffered in full (bounded by
//! `limits.max_body_bytes`) and forwarded byte-for-byte; no response bytes
//! are written until the outcome is known.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http_body_util::LengthLimitError;

use crate::http::error::RelayError;
use crate::http::headers::ForwardedHeaders;
use crate::http::server::AppState;
use crate::upstream::{ForwardedUpload, UpstreamReply};

/// Entry point for `POST /upload-go`.
pub async fn relay_upload(State(state): State<AppState>, request: Request<Body>) -> Response {
    match relay(&state, request).await {
        Ok(reply) => relayed(reply),
        Err(err) => {
            log_failure(&err);
            err.into_response()
        }
    }
}

async fn relay(state: &AppState, request: Request<Body>) -> Result<UpstreamReply, RelayError> {
    if request.method() != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let limit = state.max_body_bytes;
    let (parts, body) = request.into_parts();
    if declared_length(&parts.headers).is_some_and(|len| len > limit as u64) {
        return Err(RelayError::BodyTooLarge { limit });
    }

    let body = buffer_body(body, limit).await?;
    if body.is_empty() {
        return Err(RelayError::EmptyBody);
    }

    tracing::info!(
        bytes = body.len(),
        upstream = %state.upstream.url(),
        "Receiving upload, forwarding to upstream"
    );

    let upload = ForwardedUpload {
        headers: ForwardedHeaders::from_inbound(&parts.headers),
        body,
    };
    let reply = state.upstream.forward(upload).await?;

    if reply.status != StatusCode::OK {
        return Err(RelayError::Upstream {
            status: reply.status,
            body: reply.body,
        });
    }
    Ok(reply)
}

fn relayed(reply: UpstreamReply) -> Response {
    let mut response = Response::new(Body::from(reply.body));
    if let Some(content_type) = reply.content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

async fn buffer_body(body: Body, limit: usize) -> Result<Bytes, RelayError> {
    axum::body::to_bytes(body, limit).await.map_err(|err| {
        if exceeded_limit(&err) {
            RelayError::BodyTooLarge { limit }
        } else {
            RelayError::BodyRead(err.to_string())
        }
    })
}

fn exceeded_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

fn log_failure(err: &RelayError) {
    match err {
        RelayError::Upstream { status, body } => {
            tracing::warn!(
                status = %status,
                body = %String::from_utf8_lossy(body),
                "Upstream rejected upload"
            );
        }
        err if err.is_client_error() => {
            tracing::warn!(error = %err, status = %err.status(), "Rejected upload");
        }
        err => {
            tracing::error!(error = %err, "Upload relay failed");
        }
    }
}
