//! Single-backend API proxy library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::ProxyConfig;
pub use http::{HttpServer, ProxyHandler};
pub use lifecycle::Shutdown;
