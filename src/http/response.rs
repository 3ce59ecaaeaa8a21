//! Response construction for the caller.
//!
//! # Responsibilities
//! - Relay the backend's status, status text, and body
//! - Force `Content-Type: application/json` and add CORS headers
//! - Build the JSON error envelope for transport failures
//!
//! # Design Decisions
//! - Backend body is relayed as text, never re-encoded as JSON
//! - Backend 4xx/5xx are relayed, not treated as failures
//! - Backend response headers other than status text are not relayed

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, Response, StatusCode},
};
use hyper::ext::ReasonPhrase;
use serde::{Deserialize, Serialize};

use crate::security::headers::CorsPolicy;

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// JSON body returned when the backend could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing a single string field cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| String::from(r#"{"error":""}"#))
    }
}

/// What the backend sent back, fully read.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    /// Non-canonical status text, when the backend sent one.
    pub reason: Option<ReasonPhrase>,
    pub body: String,
}

/// Build the caller's response from a backend reply.
pub fn relay(reply: BackendReply, cors: &CorsPolicy) -> Response<Body> {
    let mut response = Response::new(Body::from(reply.body));
    *response.status_mut() = reply.status;
    if let Some(reason) = reply.reason {
        response.extensions_mut().insert(reason);
    }
    response.headers_mut().insert(CONTENT_TYPE, application_json());
    cors.apply(response.headers_mut());
    response
}

/// Build the 500 response for a failed backend exchange.
pub fn transport_failure(message: &str, cors: &CorsPolicy) -> Response<Body> {
    let mut response = Response::new(Body::from(ErrorEnvelope::new(message).to_json()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(CONTENT_TYPE, application_json());
    if cors.on_error() {
        cors.apply(response.headers_mut());
    }
    response
}
