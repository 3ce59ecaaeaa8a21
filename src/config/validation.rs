//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the backend origin is a bare authority, not a URL
//! - Validate value ranges (timeouts > 0) and header syntax
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{uri::Authority, HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// Headers the proxy manages itself and refuses to copy from the client.
const MANAGED_HEADERS: &[&str] = &[
    "host",
    "content-type",
    "content-length",
    "connection",
    "transfer-encoding",
    "x-request-id",
];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    check_prefix("proxy.path_prefix", &config.proxy.path_prefix, &mut errors);
    if config
        .proxy
        .path_prefix
        .split('/')
        .any(|segment| segment.starts_with(&[':', '*'][..]))
    {
        errors.push(ValidationError::new(
            "proxy.path_prefix",
            "segments must not start with ':' or '*'",
        ));
    }
    check_prefix("backend.api_prefix", &config.backend.api_prefix, &mut errors);
    check_origin(&config.backend.origin, &mut errors);

    for name in &config.backend.forward_headers {
        match HeaderName::try_from(name.as_str()) {
            Ok(header) if MANAGED_HEADERS.contains(&header.as_str()) => {
                errors.push(ValidationError::new(
                    "backend.forward_headers",
                    format!("'{}' is managed by the proxy and cannot be forwarded", name),
                ));
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::new(
                "backend.forward_headers",
                format!("'{}' is not a valid header name", name),
            )),
        }
    }

    for (field, value) in [
        ("timeouts.connect_secs", config.timeouts.connect_secs),
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be greater than zero"));
        }
    }
    // The overall request timeout answers 408 with no body; the upstream
    // deadline must fire first so callers get the JSON envelope.
    if config.timeouts.upstream_secs > 0
        && config.timeouts.request_secs > 0
        && config.timeouts.request_secs <= config.timeouts.upstream_secs
    {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must be greater than timeouts.upstream_secs ({})",
                config.timeouts.upstream_secs
            ),
        ));
    }

    for (field, value) in [
        ("cors.allow_origin", &config.cors.allow_origin),
        ("cors.allow_methods", &config.cors.allow_methods),
        ("cors.allow_headers", &config.cors.allow_headers),
    ] {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::new(field, "not a valid header value"));
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new(
            "security.max_body_size",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_prefix(field: &str, prefix: &str, errors: &mut Vec<ValidationError>) {
    if !prefix.starts_with('/') {
        errors.push(ValidationError::new(field, "must start with '/'"));
    } else if prefix.len() > 1 && prefix.ends_with('/') {
        errors.push(ValidationError::new(field, "must not end with '/'"));
    } else if prefix.contains(&['?', '#', '{', '}'][..]) {
        errors.push(ValidationError::new(field, "must be a plain path"));
    }
}

fn check_origin(origin: &str, errors: &mut Vec<ValidationError>) {
    const FIELD: &str = "backend.origin";

    if origin.contains("://") {
        errors.push(ValidationError::new(FIELD, "must be host[:port] without a scheme"));
        return;
    }
    match origin.parse::<Authority>() {
        Ok(authority) if authority.as_str().contains('@') => {
            errors.push(ValidationError::new(FIELD, "must not carry credentials"));
        }
        Ok(authority) if authority.host().is_empty() => {
            errors.push(ValidationError::new(FIELD, "host is empty"));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new(
            FIELD,
            format!("'{}' is not a valid authority: {}", origin, e),
        )),
    }
}
