//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound request:
//!     → headers.rs (allowlisted inbound headers only)
//! Response to caller:
//!     → headers.rs (CORS headers)
//! ```
//!
//! # Design Decisions
//! - The backend origin comes from config only (no open-proxy behavior)
//! - Nothing from the client reaches the backend unless allowlisted

pub mod headers;
