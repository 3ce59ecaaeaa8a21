//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → capture.rs (strip mount prefix, split segments)
//!     → target.rs (fixed origin + API prefix + segments + query)
//!     → Return: BackendTarget
//! ```
//!
//! # Design Decisions
//! - Mount and origin built at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always resolves to the same target

pub mod capture;
pub mod target;

pub use capture::Mount;
pub use target::{BackendOrigin, BackendTarget};
