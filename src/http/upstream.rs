//! Forwarding of pass-through requests to the site origin.
//!
//! # Design Decisions
//! - One attempt per request; failures map to 502 Bad Gateway
//! - Path, query and end-to-end headers are forwarded unchanged
//! - The origin is always spoken to over HTTP/1.1, whatever the client used
//! - Response bodies stream back without buffering

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, Scheme},
        HeaderMap, Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::request::request_id;
use crate::observability::metrics;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("upstream URL has no host")]
    MissingHost,

    #[error("invalid upstream authority: {0}")]
    Authority(#[from] axum::http::uri::InvalidUri),
}

/// Connection-scoped headers that must not travel to the origin.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "transfer-encoding",
    "upgrade",
    "te",
    "trailer",
    "proxy-connection",
];

/// HTTP origin that serves the actual site.
#[derive(Clone)]
pub struct Upstream {
    authority: Authority,
    /// Path of the origin URL without a trailing slash; empty for the root.
    base_path: String,
    client: Client<HttpConnector, Body>,
}

impl Upstream {
    pub fn new(address: &str, connect_timeout: Duration) -> Result<Self, UpstreamError> {
        let url = Url::parse(address)?;
        let host = url.host_str().ok_or(UpstreamError::MissingHost)?;
        let authority = match url.port_or_known_default() {
            Some(port) => Authority::from_str(&format!("{host}:{port}"))?,
            None => Authority::from_str(host)?,
        };

        let base_path = url.path().trim_end_matches('/').to_string();

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            authority,
            base_path,
            client,
        })
    }

    /// Build from config; `None` when no origin is configured.
    pub fn from_config(config: &UpstreamConfig) -> Result<Option<Self>, UpstreamError> {
        config
            .address
            .as_deref()
            .map(|address| Self::new(address, Duration::from_secs(config.connect_timeout_secs)))
            .transpose()
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    fn target_uri(&self, original: &Uri) -> Result<Uri, axum::http::Error> {
        let path_and_query = original
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(format!("{}{path_and_query}", self.base_path))
            .build()
    }
}

/// Fallback handler forwarding every request that reaches it.
pub async fn forward(State(upstream): State<Arc<Upstream>>, request: Request<Body>) -> Response {
    let request_id = request_id(&request).to_string();
    let (mut parts, body) = request.into_parts();

    parts.uri = match upstream.target_uri(&parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    parts.version = Version::HTTP_11;
    strip_hop_by_hop(&mut parts.headers);

    tracing::debug!(
        request_id = %request_id,
        uri = %parts.uri,
        "Forwarding request"
    );

    match upstream.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %upstream.authority,
                error = %e,
                "Upstream request failed"
            );
            metrics::record_upstream_error();
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(*name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_authority_with_default_port() {
        let upstream = Upstream::new("http://site.internal", TIMEOUT).unwrap();
        assert_eq!(upstream.authority().as_str(), "site.internal:80");
    }

    #[tokio::test]
    async fn test_target_uri_keeps_path_and_query() {
        let upstream = Upstream::new("http://127.0.0.1:3000", TIMEOUT).unwrap();
        let original: Uri = "/en/pricing?plan=pro".parse().unwrap();
        let uri = upstream.target_uri(&original).unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:3000/en/pricing?plan=pro");
    }

    #[tokio::test]
    async fn test_target_uri_prepends_origin_path() {
        let original: Uri = "/en/pricing?plan=pro".parse().unwrap();

        let upstream = Upstream::new("http://origin:3000/site", TIMEOUT).unwrap();
        let uri = upstream.target_uri(&original).unwrap();
        assert_eq!(uri.to_string(), "http://origin:3000/site/en/pricing?plan=pro");

        let upstream = Upstream::new("http://origin:3000/site/", TIMEOUT).unwrap();
        let uri = upstream.target_uri(&"/".parse().unwrap()).unwrap();
        assert_eq!(uri.to_string(), "http://origin:3000/site/");
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert("keep-alive", "timeout=5".parse().unwrap());
        headers.insert(header::TE, "trailers".parse().unwrap());
        headers.insert(header::UPGRADE, "h2c".parse().unwrap());
        headers.insert("proxy-connection", "close".parse().unwrap());
        headers.insert(header::ACCEPT_LANGUAGE, "en".parse().unwrap());

        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[header::ACCEPT_LANGUAGE], "en");
    }

    #[tokio::test]
    async fn test_from_config_without_address() {
        let config = UpstreamConfig::default();
        assert!(Upstream::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_hostless_url() {
        assert!(Upstream::new("unix:/tmp/socket", TIMEOUT).is_err());
    }
}
