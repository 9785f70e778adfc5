//! Request classification through the full in-process router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;

use locale_gate::config::GateConfig;
use locale_gate::gate::rules::{DEFAULT_SKIP_PATHS, DEFAULT_SKIP_PREFIXES};
use locale_gate::http::GateServer;

const HEADERS: [Option<&str>; 4] = [
    None,
    Some(""),
    Some("en-US,en;q=0.9"),
    Some("es-ES,es;q=0.9"),
];

async fn get(path: &str, accept_language: Option<&str>) -> Response {
    get_with(GateConfig::default(), path, accept_language).await
}

async fn get_with(config: GateConfig, path: &str, accept_language: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(path);
    if let Some(value) = accept_language {
        builder = builder.header("accept-language", value);
    }
    GateServer::new(&config)
        .unwrap()
        .router()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()["location"].to_str().unwrap()
}

fn assert_untouched(response: &Response, path: &str) {
    assert_eq!(response.status(), StatusCode::OK, "{path}");
    assert!(response.headers().get("location").is_none(), "{path}");
    assert!(
        response.headers().get("x-content-type-options").is_none(),
        "{path} should not be hardened"
    );
}

#[tokio::test]
async fn test_skip_paths_pass_through_for_any_header() {
    let mut paths: Vec<String> = DEFAULT_SKIP_PATHS.iter().map(|p| p.to_string()).collect();
    paths.extend(DEFAULT_SKIP_PREFIXES.iter().map(|p| format!("{p}chunk")));
    paths.extend(
        ["/logo.svg", "/styles/site.css", "/en/hero.jpg", "/data/menu.json"]
            .iter()
            .map(|p| p.to_string()),
    );

    for path in &paths {
        for header in HEADERS {
            let response = get(path, header).await;
            assert_untouched(&response, path);
        }
    }
}

#[tokio::test]
async fn test_localized_paths_are_hardened() {
    for path in ["/es", "/en", "/es/", "/en/contact", "/es/blog/menu-digital"] {
        for header in HEADERS {
            let response = get(path, header).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        }
    }
}

#[tokio::test]
async fn test_english_preference_redirects_to_en() {
    for path in ["/", "/about", "/pricing/pos", "/enterprise"] {
        let response = get(path, Some("en-US,en;q=0.9")).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let expected = if path == "/" { "/en".to_string() } else { format!("/en{path}") };
        assert_eq!(location(&response), expected);
    }
}

#[tokio::test]
async fn test_missing_preference_redirects_to_default() {
    for header in [None, Some(""), Some("de-DE,fr;q=0.8")] {
        let response = get("/about", header).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/es/about");
    }
}

#[tokio::test]
async fn test_root_with_spanish_preference() {
    let response = get("/", Some("es-ES,es;q=0.9")).await;
    assert_eq!(location(&response), "/es");
}

#[tokio::test]
async fn test_redirects_are_not_hardened() {
    let response = get("/about", None).await;
    assert!(response.headers().get("x-content-type-options").is_none());
}

#[tokio::test]
async fn test_local_fallback_sees_resolved_locale() {
    let response = get("/en/contact", None).await;
    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"en /en/contact");
}

#[tokio::test]
async fn test_configured_skip_prefix() {
    let mut config = GateConfig::default();
    config.skip.prefixes.push("/static/".into());

    let response = get_with(config, "/static/brochure", Some("en")).await;
    assert_untouched(&response, "/static/brochure");

    let response = get("/static/brochure", Some("en")).await;
    assert_eq!(location(&response), "/en/static/brochure");
}
