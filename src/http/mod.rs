//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign x-request-id)
//!     → gate (skip / localized / redirect)
//!     → upstream.rs (forward to site origin) or local fallback
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod upstream;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{build_router, GateServer, ServerError};
pub use upstream::Upstream;
