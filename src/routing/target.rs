//! Backend target construction.
//!
//! The origin comes from configuration only. Request content contributes
//! the path segments and query string, never the authority.

use std::fmt;

use axum::http::{uri::Authority, Uri};

use crate::config::BackendConfig;

/// The fixed backend origin plus its API prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin {
    authority: Authority,
    /// API prefix without trailing `/`; empty for root.
    api_prefix: String,
}

impl BackendOrigin {
    /// Build from an already-parsed authority.
    pub fn new(authority: Authority, api_prefix: &str) -> Self {
        Self {
            authority,
            api_prefix: api_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Build from the backend section of the configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self, axum::http::uri::InvalidUri> {
        let authority = config.origin.parse::<Authority>()?;
        Ok(Self::new(authority, &config.api_prefix))
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Resolve the target for the captured segments and raw query string.
    ///
    /// Segments are joined with `/` after the API prefix. A non-empty query is
    /// appended as `?query`; an empty one adds nothing.
    pub fn target(&self, segments: &[String], query: Option<&str>) -> BackendTarget {
        let search = match query {
            Some(q) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        };
        BackendTarget {
            url: format!(
                "http://{}{}/{}{}",
                self.authority,
                self.api_prefix,
                segments.join("/"),
                search
            ),
        }
    }
}

/// A fully resolved backend URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    url: String,
}

impl BackendTarget {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Parse into a request URI.
    pub fn to_uri(&self) -> Result<Uri, axum::http::uri::InvalidUri> {
        self.url.parse()
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
