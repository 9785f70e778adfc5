//! Supported locales and language negotiation.
//!
//! # Data Flow
//! ```text
//! accept-language header (optional)
//!     → negotiate.rs (parse weighted ranges, match against supported set)
//!     → Locale (always resolves, falls back to DEFAULT)
//! ```
//!
//! # Design Decisions
//! - Closed set: the site ships exactly two translations
//! - Negotiation is a pure function of the header value
//! - Tags compare ASCII case-insensitively in headers, case-sensitively in paths

pub mod negotiate;

pub use negotiate::{negotiate, parse_accept_language, LanguageRange};

use std::fmt;
use std::str::FromStr;

/// A display language the site is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Es,
    En,
}

impl Locale {
    /// Every supported locale, in preference order for ties.
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    /// Locale served when the client expresses no usable preference.
    pub const DEFAULT: Locale = Locale::Es;

    /// The lowercase tag used in URL prefixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Look up a locale by its exact (lowercase) path tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == tag)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no supported locale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
