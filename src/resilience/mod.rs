//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → connector (connect timeout)
//!     → timeouts.rs (deadline over send + body read)
//!     → On failure: surfaced once as a transport failure, never retried
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - No retries: each inbound request makes exactly one backend call

pub mod timeouts;
