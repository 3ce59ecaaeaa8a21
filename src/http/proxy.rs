//! The proxy handler: one inbound request, one backend call, one response.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → routing::target (fixed origin + segments + query)
//!     → outbound request (same method, JSON content type, text body)
//!     → resilience::timeouts (deadline over the whole exchange)
//!     → response::relay            on any backend reply
//!     → response::transport_failure on any ProxyError
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, Request, Response},
};
use hyper::ext::ReasonPhrase;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{ConfigError, ProxyConfig, ValidationError};
use crate::http::error::{ProxyError, ProxyResult};
use crate::http::request::{forwards_body, InboundRequest, X_REQUEST_ID};
use crate::http::response::{self, BackendReply};
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::routing::{BackendOrigin, BackendTarget, Mount};
use crate::security::headers::{CorsPolicy, ForwardHeaders};

/// Forwards requests to the single configured backend.
///
/// Holds only immutable configuration and a pooled client, so one instance
/// serves any number of concurrent invocations.
#[derive(Debug, Clone)]
pub struct ProxyHandler {
    mount: Mount,
    origin: BackendOrigin,
    client: Client<HttpConnector, Body>,
    cors: CorsPolicy,
    forward_headers: ForwardHeaders,
    upstream_timeout: Duration,
    max_body_size: usize,
}

impl ProxyHandler {
    /// Build a handler from a validated configuration.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let invalid = |field: &str, e: &dyn std::fmt::Display| {
            ConfigError::Validation(vec![ValidationError {
                field: field.to_string(),
                message: e.to_string(),
            }])
        };

        let origin =
            BackendOrigin::from_config(&config.backend).map_err(|e| invalid("backend.origin", &e))?;
        let cors = CorsPolicy::from_config(&config.cors).map_err(|e| invalid("cors", &e))?;
        let forward_headers = ForwardHeaders::from_names(&config.backend.forward_headers)
            .map_err(|e| invalid("backend.forward_headers", &e))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            mount: Mount::new(config.proxy.path_prefix.as_str()),
            origin,
            client,
            cors,
            forward_headers,
            upstream_timeout: Duration::from_secs(config.timeouts.upstream_secs),
            max_body_size: config.security.max_body_size,
        })
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn origin(&self) -> &BackendOrigin {
        &self.origin
    }

    /// Proxy one request. Always produces a response.
    pub async fn handle(&self, inbound: InboundRequest) -> Response<Body> {
        let start = Instant::now();
        let method = inbound.method.clone();
        let request_id = inbound.request_id().unwrap_or("unknown").to_string();
        let target = self.origin.target(&inbound.segments, inbound.query.as_deref());

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            target = %target,
            "Forwarding request"
        );

        let exchange = with_deadline(self.upstream_timeout, self.forward(&target, inbound));
        let response = match exchange.await {
            Ok(reply) => {
                tracing::debug!(
                    request_id = %request_id,
                    status = %reply.status,
                    "Backend replied"
                );
                response::relay(reply, &self.cors)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    target = %target,
                    kind = e.kind(),
                    error = %e,
                    "Backend exchange failed"
                );
                response::transport_failure(&e.message(), &self.cors)
            }
        };

        metrics::record_request(method.as_str(), response.status().as_u16(), start);
        response
    }

    /// Send the outbound request and read the reply body.
    async fn forward(&self, target: &BackendTarget, inbound: InboundRequest) -> ProxyResult<BackendReply> {
        let uri = target.to_uri().map_err(axum::http::Error::from)?;

        let body = if forwards_body(&inbound.method) {
            let bytes = axum::body::to_bytes(inbound.body, self.max_body_size)
                .await
                .map_err(ProxyError::InboundBody)?;
            Body::from(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            Body::empty()
        };

        let mut request = Request::builder()
            .method(inbound.method)
            .uri(uri)
            .body(body)?;
        let headers = request.headers_mut();
        self.forward_headers.copy(&inbound.headers, headers);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(id) = inbound.headers.get(X_REQUEST_ID) {
            headers.insert(X_REQUEST_ID, id.clone());
        }

        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(Body::new(body), self.max_body_size)
            .await
            .map_err(ProxyError::UpstreamBody)?;

        Ok(BackendReply {
            status: parts.status,
            reason: parts.extensions.get::<ReasonPhrase>().cloned(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Axum entry point for every route under the mount.
pub async fn proxy_handler(
    State(handler): State<Arc<ProxyHandler>>,
    request: Request<Body>,
) -> Response<Body> {
    let inbound = InboundRequest::from_request(handler.mount(), request);
    handler.handle(inbound).await
}
