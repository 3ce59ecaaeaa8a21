//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the API proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the proxy is mounted on the inbound side.
    pub proxy: MountConfig,

    /// The single backend every request is forwarded to.
    pub backend: BackendConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cross-origin headers added to proxied responses.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request/response size limits.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Inbound mount point.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountConfig {
    /// Path prefix the handler is registered under. Everything after it is
    /// captured as path segments.
    pub path_prefix: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/api".to_string(),
        }
    }
}

/// Backend origin configuration.
///
/// The origin is fixed for the lifetime of the process and is never derived
/// from request content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend authority (e.g., "10.0.0.5:5000"). No scheme, no path.
    pub origin: String,

    /// Path prefix prepended to the captured segments on the backend side.
    pub api_prefix: String,

    /// Extra inbound headers copied onto the outbound request.
    /// Empty by default: only `Content-Type` and `X-Request-ID` are sent.
    pub forward_headers: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: "127.0.0.1:5000".to_string(),
            api_prefix: "/api".to_string(),
            forward_headers: Vec::new(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Backend connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for the whole backend exchange (send + read body) in seconds.
    pub upstream_secs: u64,

    /// Overall inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// CORS header values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `Access-Control-Allow-Origin` value.
    pub allow_origin: String,

    /// `Access-Control-Allow-Methods` value.
    pub allow_methods: String,

    /// `Access-Control-Allow-Headers` value.
    pub allow_headers: String,

    /// Also add the headers to 500 transport-failure responses.
    /// Set to false to keep error responses bare for older callers.
    pub on_error: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
            on_error: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes, inbound and backend reply alike.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_behavior() {
        let config = ProxyConfig::default();
        assert_eq!(config.proxy.path_prefix, "/api");
        assert_eq!(config.backend.api_prefix, "/api");
        assert!(config.backend.forward_headers.is_empty());
        assert_eq!(config.cors.allow_origin, "*");
        assert_eq!(config.cors.allow_methods, "GET, POST, OPTIONS");
        assert_eq!(config.cors.allow_headers, "Content-Type");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [backend]
            origin = "10.0.0.5:5000"

            [cors]
            on_error = false
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.origin, "10.0.0.5:5000");
        assert_eq!(config.backend.api_prefix, "/api");
        assert!(!config.cors.on_error);
        assert_eq!(config.cors.allow_origin, "*");
        assert_eq!(config.timeouts.upstream_secs, 30);
    }
}
