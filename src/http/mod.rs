//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, split into InboundRequest)
//!     → proxy.rs (resolve target, call backend)
//!     → response.rs (relay or error envelope, CORS)
//!     → Send to client
//! ```

pub mod error;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use error::ProxyError;
pub use proxy::ProxyHandler;
pub use request::{InboundRequest, X_REQUEST_ID};
pub use response::ErrorEnvelope;
pub use server::HttpServer;
