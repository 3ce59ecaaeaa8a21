//! Transport failure taxonomy.
//!
//! Every variant surfaces to the caller the same way: HTTP 500 with a JSON
//! error envelope. The variants only exist so logs can tell causes apart.
//! Backend error statuses are not represented here; they are relayed as-is.

use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;

/// Failure to complete the backend exchange.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound body could not be read (client abort, size limit).
    #[error("failed to read request body: {0}")]
    InboundBody(#[source] axum::Error),

    /// The outbound request could not be assembled.
    #[error("invalid backend request: {0}")]
    Request(#[from] axum::http::Error),

    /// Connect, DNS, or protocol failure talking to the backend.
    #[error("backend request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The backend response body could not be read.
    #[error("failed to read backend response: {0}")]
    UpstreamBody(#[source] axum::Error),

    /// The exchange did not finish within the upstream deadline.
    #[error("backend did not respond within {0:?}")]
    Timeout(Duration),
}

impl ProxyError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::InboundBody(_) => "inbound_body",
            ProxyError::Request(_) => "request",
            ProxyError::Upstream(_) => "upstream",
            ProxyError::UpstreamBody(_) => "upstream_body",
            ProxyError::Timeout(_) => "timeout",
        }
    }

    /// Message reported to the caller: the error and its source chain, with
    /// repeated fragments dropped.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

/// Result type alias for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
