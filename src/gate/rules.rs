//! Paths that must never be locale-rewritten.

use crate::config::SkipConfig;

/// Crawler and browser contract files served from the site root.
pub const DEFAULT_SKIP_PATHS: &[&str] = &[
    "/robots.txt",
    "/sitemap.xml",
    "/favicon.ico",
    "/manifest.webmanifest",
];

/// Framework asset and API route prefixes.
pub const DEFAULT_SKIP_PREFIXES: &[&str] = &["/_next/", "/api/"];

/// Static asset and document extensions.
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[
    "svg", "png", "jpg", "jpeg", "gif", "webp", "avif", "ico", "css", "js", "mjs", "map",
    "json", "xml", "txt", "pdf", "woff", "woff2", "ttf", "otf", "eot", "mp4", "webm",
    "webmanifest",
];

/// Immutable skip rule set, built once at startup and shared via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRules {
    paths: Vec<String>,
    prefixes: Vec<String>,
    /// Lowercased, without the leading dot.
    extensions: Vec<String>,
}

impl SkipRules {
    pub fn new<P, X, E>(paths: P, prefixes: X, extensions: E) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        X: IntoIterator,
        X::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            extensions: extensions
                .into_iter()
                .map(|e| Into::<String>::into(e).trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &SkipConfig) -> Self {
        Self::new(
            config.paths.iter().cloned(),
            config.prefixes.iter().cloned(),
            config.extensions.iter().cloned(),
        )
    }

    /// Returns true if the path names a non-page resource.
    pub fn matches(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
            || self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
            || self.has_skipped_extension(path)
    }

    fn has_skipped_extension(&self, path: &str) -> bool {
        let segment = path.rsplit('/').next().unwrap_or(path);
        match segment.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => self
                .extensions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(ext)),
            _ => false,
        }
    }
}

impl Default for SkipRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_SKIP_PATHS.iter().copied(),
            DEFAULT_SKIP_PREFIXES.iter().copied(),
            DEFAULT_SKIP_EXTENSIONS.iter().copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_files_skip() {
        let rules = SkipRules::default();
        for path in DEFAULT_SKIP_PATHS {
            assert!(rules.matches(path), "{path} should skip");
        }
    }

    #[test]
    fn test_prefixes_skip() {
        let rules = SkipRules::default();
        assert!(rules.matches("/_next/static/chunks/main.js"));
        assert!(rules.matches("/api/contact"));
        assert!(!rules.matches("/api"));
        assert!(!rules.matches("/apidocs"));
    }

    #[test]
    fn test_extensions_skip_regardless_of_locale() {
        let rules = SkipRules::default();
        assert!(rules.matches("/logo.png"));
        assert!(rules.matches("/en/images/hero.WEBP"));
        assert!(rules.matches("/es/docs/menu.pdf"));
        assert!(rules.matches("/fonts/inter.woff2"));
    }

    #[test]
    fn test_pages_do_not_skip() {
        let rules = SkipRules::default();
        assert!(!rules.matches("/"));
        assert!(!rules.matches(""));
        assert!(!rules.matches("/about"));
        assert!(!rules.matches("/en"));
        assert!(!rules.matches("/es/pricing"));
        assert!(!rules.matches("/blog/v1.2"));
        assert!(!rules.matches("/.well-known"));
    }

    #[test]
    fn test_dot_only_in_directory_does_not_skip() {
        let rules = SkipRules::default();
        assert!(!rules.matches("/assets.png/landing"));
    }

    #[test]
    fn test_custom_extensions_are_normalized() {
        let rules = SkipRules::new(Vec::<String>::new(), Vec::<String>::new(), [".CSV"]);
        assert!(rules.matches("/export/menu.csv"));
        assert!(!rules.matches("/logo.png"));
    }
}
