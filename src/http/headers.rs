//! Header curation for forwarded uploads.
//!
//! Only a fixed set of inbound headers is forwarded upstream. Missing or
//! empty values fall back to defaults; values that are present are copied
//! byte-for-byte.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

pub const X_UPLOAD_TYPE: HeaderName = HeaderName::from_static("x-uploadtype");
pub const X_FILE_NAME: HeaderName = HeaderName::from_static("x-filename");
pub const X_ITEM_TYPE: HeaderName = HeaderName::from_static("x-itemtype");
pub const X_PENDING_ID: HeaderName = HeaderName::from_static("x-pendingid");
pub const X_ITEM_ID: HeaderName = HeaderName::from_static("x-itemid");

pub const DEFAULT_UPLOAD_TYPE: &str = "raw";
pub const DEFAULT_ITEM_TYPE: &str = "libraryitem";
pub const DEFAULT_CONTENT_TYPE: &str = "content/unknown";

/// Value of `Access-Control-Allow-Headers`: the headers the relay consumes.
pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type, X-UploadType, X-FileName, X-ItemType, X-PendingId, X-ItemId";

/// Curated header set sent with an outbound upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub upload_type: HeaderValue,
    pub file_name: HeaderValue,
    pub item_type: HeaderValue,
    pub content_type: HeaderValue,
    pub pending_id: HeaderValue,
    pub item_id: HeaderValue,
}

impl ForwardedHeaders {
    /// Select and default the forwarded headers from an inbound request.
    pub fn from_inbound(inbound: &HeaderMap) -> Self {
        Self {
            upload_type: value_or(inbound, &X_UPLOAD_TYPE, DEFAULT_UPLOAD_TYPE),
            file_name: value_or(inbound, &X_FILE_NAME, ""),
            item_type: value_or(inbound, &X_ITEM_TYPE, DEFAULT_ITEM_TYPE),
            content_type: value_or(inbound, &header::CONTENT_TYPE, DEFAULT_CONTENT_TYPE),
            pending_id: value_or(inbound, &X_PENDING_ID, ""),
            item_id: value_or(inbound, &X_ITEM_ID, ""),
        }
    }

    /// Render as a header map for the outbound request.
    pub fn into_header_map(self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(6);
        headers.insert(X_UPLOAD_TYPE, self.upload_type);
        headers.insert(X_FILE_NAME, self.file_name);
        headers.insert(X_ITEM_TYPE, self.item_type);
        headers.insert(header::CONTENT_TYPE, self.content_type);
        headers.insert(X_PENDING_ID, self.pending_id);
        headers.insert(X_ITEM_ID, self.item_id);
        headers
    }
}

/// First value of `name`, or `default` when absent or empty.
fn value_or(headers: &HeaderMap, name: &HeaderName, default: &'static str) -> HeaderValue {
    match headers.get(name) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => HeaderValue::from_static(default),
    }
}
