//! Axum middleware applying the gate to every request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::gate::classify::{classify, Outcome};
use crate::gate::rules::SkipRules;
use crate::locale::Locale;
use crate::security::headers;

/// The locale of an already-localized request.
///
/// Inserted into request extensions so handlers behind the gate can read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

pub async fn locale_gate(
    State(rules): State<Arc<SkipRules>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let accept_language = accept_language(request.headers());

    match classify(request.uri().path(), accept_language.as_deref(), &rules) {
        Outcome::Skip => next.run(request).await,
        Outcome::Localized { locale } => {
            request.extensions_mut().insert(ResolvedLocale(locale));
            let mut response = next.run(request).await;
            headers::harden(response.headers_mut());
            response
        }
        Outcome::Redirect { target, .. } => {
            let location = match request.uri().query() {
                Some(query) => format!("{target}?{query}"),
                None => target,
            };
            Redirect::temporary(&location).into_response()
        }
    }
}

/// All Accept-Language lines joined into one list; `None` when absent.
/// Lines that are not valid UTF-8 are ignored.
fn accept_language(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<&str> = headers
        .get_all(header::ACCEPT_LANGUAGE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    (!lines.is_empty()).then(|| lines.join(","))
}
