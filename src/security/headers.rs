//! Response hardening headers.
//!
//! Only localized page responses are hardened; bot files and static assets
//! pass through untouched.

use axum::http::{header, HeaderMap, HeaderValue};

/// Add content-type sniffing protection, replacing any upstream value.
pub fn harden(headers: &mut HeaderMap) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
}
