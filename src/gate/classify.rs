//! Three-way request classification.

use crate::gate::rules::SkipRules;
use crate::locale::{self, Locale};

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Non-page resource; pass through untouched.
    Skip,
    /// Already carries a locale prefix; pass through with hardening headers.
    Localized { locale: Locale },
    /// Needs a locale prefix; redirect to `target`.
    Redirect { locale: Locale, target: String },
}

/// Classify a request path. Never fails: every input maps to an outcome.
pub fn classify(path: &str, accept_language: Option<&str>, rules: &SkipRules) -> Outcome {
    if rules.matches(path) {
        return Outcome::Skip;
    }

    if let Some(locale) = locale_prefix(path) {
        return Outcome::Localized { locale };
    }

    let locale = locale::negotiate(accept_language, &Locale::ALL, Locale::DEFAULT);
    Outcome::Redirect {
        locale,
        target: redirect_target(locale, path),
    }
}

/// The locale a path is already prefixed with: `/<tag>` or `/<tag>/...`.
pub fn locale_prefix(path: &str) -> Option<Locale> {
    let rest = path.strip_prefix('/')?;
    let segment = rest.split('/').next().unwrap_or(rest);
    Locale::from_tag(segment)
}

/// Prefix `path` with `/<locale>` without producing a double slash.
pub fn redirect_target(locale: Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{locale}"),
        p if p.starts_with('/') => format!("/{locale}{p}"),
        p => format!("/{locale}/{p}"),
    }
}
