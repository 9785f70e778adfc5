//! Accept-Language parsing and matching.
//!
//! # Responsibilities
//! - Parse the weighted, ordered language range list
//! - Pick the first supported locale by quality, then header order
//! - Fall back to the default for absent, malformed or unmatched headers
//!
//! # Design Decisions
//! - Ranges with an unparseable quality are dropped rather than trusted
//! - `q=0` means "not acceptable" and removes the range
//! - Primary subtag matching (`en-GB` → `en`) after exact matching

use crate::locale::Locale;

/// One entry of an Accept-Language header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// Lowercased language tag, e.g. `en-us` or `*`.
    pub tag: String,
    /// Quality weight in `[0, 1]`.
    pub quality: f32,
}

impl LanguageRange {
    /// The part of the tag before the first `-`.
    pub fn primary(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }

    fn is_wildcard(&self) -> bool {
        self.tag == "*"
    }
}

/// Parse an Accept-Language header value into ranges sorted by quality,
/// highest first. Ties keep header order.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }

            let mut params = part.split(';');
            let tag = params.next()?.trim().to_ascii_lowercase();
            if tag.is_empty() {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in params {
                let param = param.trim();
                if let Some(q) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    quality = q.trim().parse::<f32>().ok().filter(|q| q.is_finite())?;
                }
            }
            let quality = quality.clamp(0.0, 1.0);
            if quality == 0.0 {
                return None;
            }

            Some(LanguageRange { tag, quality })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranges
}

/// Resolve the locale for a request from its Accept-Language value.
pub fn negotiate(header: Option<&str>, supported: &[Locale], default: Locale) -> Locale {
    let Some(header) = header else {
        return default;
    };

    for range in parse_accept_language(header) {
        if range.is_wildcard() {
            return default;
        }
        if let Some(locale) = supported
            .iter()
            .find(|l| range.tag == l.as_str())
            .or_else(|| supported.iter().find(|l| range.primary() == l.as_str()))
        {
            return *locale;
        }
    }

    default
}
