//! Header policy for both legs of the proxy.
//!
//! # Responsibilities
//! - Add CORS response headers to relayed responses
//! - Decide which inbound headers reach the backend
//!
//! # Design Decisions
//! - Outbound headers are allowlisted: nothing is copied unless configured
//! - Header values are parsed once at startup, not per request

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    HeaderMap, HeaderName, HeaderValue,
};

use crate::config::CorsConfig;

/// Parsed CORS header values.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
    on_error: bool,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Result<Self, axum::http::header::InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(&config.allow_origin)?,
            allow_methods: HeaderValue::from_str(&config.allow_methods)?,
            allow_headers: HeaderValue::from_str(&config.allow_headers)?,
            on_error: config.on_error,
        })
    }

    /// Whether transport-failure responses also get the headers.
    pub fn on_error(&self) -> bool {
        self.on_error
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, POST, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type"),
            on_error: true,
        }
    }
}

/// Inbound headers copied onto the backend request.
#[derive(Debug, Clone, Default)]
pub struct ForwardHeaders {
    names: Vec<HeaderName>,
}

impl ForwardHeaders {
    pub fn from_names<S: AsRef<str>>(
        names: &[S],
    ) -> Result<Self, axum::http::header::InvalidHeaderName> {
        let names = names
            .iter()
            .map(|n| HeaderName::try_from(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { names })
    }

    /// Copy every allowlisted header (all values, in order) from `inbound`.
    pub fn copy(&self, inbound: &HeaderMap, outbound: &mut HeaderMap) {
        for name in &self.names {
            for value in inbound.get_all(name) {
                outbound.append(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_sets_three_headers() {
        let mut headers = HeaderMap::new();
        CorsPolicy::default().apply(&mut headers);

        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn policy_from_config() {
        let config = CorsConfig {
            allow_origin: "https://app.example".into(),
            on_error: false,
            ..CorsConfig::default()
        };
        let policy = CorsPolicy::from_config(&config).unwrap();
        assert!(!policy.on_error());

        let mut headers = HeaderMap::new();
        policy.apply(&mut headers);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
    }

    #[test]
    fn forwards_only_allowlisted_headers() {
        let forward = ForwardHeaders::from_names(&["authorization", "Cookie"]).unwrap();

        let mut inbound = HeaderMap::new();
        inbound.insert("authorization", HeaderValue::from_static("Bearer t"));
        inbound.append("cookie", HeaderValue::from_static("a=1"));
        inbound.append("cookie", HeaderValue::from_static("b=2"));
        inbound.insert("x-secret", HeaderValue::from_static("nope"));

        let mut outbound = HeaderMap::new();
        forward.copy(&inbound, &mut outbound);

        assert_eq!(outbound["authorization"], "Bearer t");
        let cookies: Vec<_> = outbound.get_all("cookie").iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert!(outbound.get("x-secret").is_none());
    }

    #[test]
    fn empty_allowlist_copies_nothing() {
        let mut inbound = HeaderMap::new();
        inbound.insert("authorization", HeaderValue::from_static("Bearer t"));

        let mut outbound = HeaderMap::new();
        ForwardHeaders::default().copy(&inbound, &mut outbound);
        assert!(outbound.is_empty());
    }
}
