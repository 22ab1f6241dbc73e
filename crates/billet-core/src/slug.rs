//! Slug derivation policies.
//!
//! Two strategies coexist, and the difference is deliberate:
//!
//! - [`normalize`] is the custom post strategy: lowercase, whitespace
//!   runs collapsed to single hyphens, every character outside
//!   `[a-z0-9_-]` stripped, truncated to 96 characters.
//! - [`default_slugify`] is the hosting platform's default behaviour,
//!   used for author and category slugs: trim, lowercase, whitespace
//!   runs to hyphens, truncated to 96 characters — accents and other
//!   symbols are left alone.
//!
//! Uniqueness is not handled here; it is checked against the document
//! corpus at save time (see [`crate::validate::SlugLookup`]). A
//! collision is a validation error, never auto-suffixed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum slug length, in characters, across all document types.
pub const MAX_LENGTH: usize = 96;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_-]+").expect("static regex"));

/// A URL-safe identifier derived from a human-readable field.
///
/// Wire shape: `{ "current": "mon-article" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.current
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.current)
    }
}

/// Custom normalizer used for post slugs.
///
/// Lowercase, whitespace runs become single hyphens, everything outside
/// `[a-z0-9_-]` is stripped, and the result is cut at [`MAX_LENGTH`]
/// characters. Accented characters are dropped rather than transliterated.
#[must_use]
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    truncate_chars(&stripped, MAX_LENGTH)
}

/// The hosting platform's default slug generator, used for author and
/// category slugs: trim, lowercase, whitespace runs to hyphens, cut at
/// [`MAX_LENGTH`] characters. No symbol stripping.
#[must_use]
pub fn default_slugify(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    truncate_chars(&hyphenated, MAX_LENGTH)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
