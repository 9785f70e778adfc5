//! Request ID assignment.
//!
//! An incoming `x-request-id` is kept; otherwise a UUID v4 is generated. The
//! ID is echoed on the response and travels to the upstream with the other
//! request headers.

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

pub fn set_request_id() -> SetRequestIdLayer<MakeRequestUuidV4> {
    SetRequestIdLayer::x_request_id(MakeRequestUuidV4)
}

pub fn propagate_request_id() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// The request ID as a string, or "unknown" before the layer has run.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
