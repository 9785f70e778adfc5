//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (request body size)
//!     → [gate classifies request]
//! Outgoing response (localized pages only):
//!     → headers.rs (X-Content-Type-Options: nosniff)
//! ```

pub mod headers;
pub mod limits;
