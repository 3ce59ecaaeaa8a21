//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) when the client sent none
//! - Capture method, path segments, query, headers, and body
//! - Decide whether the method carries a forwarded body
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body stays an unread stream until the handler needs it

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::routing::Mount;

/// Request ID header name.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a UUID v4 request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID from headers, if present and printable.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
}

/// GET and HEAD never forward a body.
pub fn forwards_body(method: &Method) -> bool {
    method != Method::GET && method != Method::HEAD
}

/// An inbound request as seen by the proxy handler.
#[derive(Debug)]
pub struct InboundRequest {
    pub method: Method,
    /// Path components captured after the mount prefix.
    pub segments: Vec<String>,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    /// Unread body stream; only consumed when [`forwards_body`] holds.
    pub body: Body,
}

impl InboundRequest {
    /// Split an HTTP request routed under `mount`.
    ///
    /// A path outside the mount captures no segments.
    pub fn from_request(mount: &Mount, request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();
        let segments = mount.capture(parts.uri.path()).unwrap_or_default();
        Self {
            method: parts.method,
            segments,
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers,
            body,
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        request_id(&self.headers)
    }
}
