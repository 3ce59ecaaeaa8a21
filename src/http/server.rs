//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler mounted under the prefix
//! - Wire up middleware (tracing, request ID, overall timeout)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::validate_config;
use crate::config::{ConfigError, ProxyConfig};
use crate::http::proxy::{proxy_handler, ProxyHandler};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};

/// HTTP server for the API proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is validated again here so a bad mount prefix is
    /// reported as an error rather than a router panic.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let handler = Arc::new(ProxyHandler::from_config(&config)?);
        let router = Self::build_router(&config, handler);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, handler: Arc<ProxyHandler>) -> Router {
        let mut router = Router::new();
        for pattern in handler.mount().route_patterns() {
            router = router.route(&pattern, any(proxy_handler));
        }

        router.with_state(handler).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path_prefix = %self.config.proxy.path_prefix,
            backend_origin = %self.config.backend.origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
