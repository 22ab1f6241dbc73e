//! Per-field validation checks.
//!
//! Every check returns `Option<FieldError>` — `None` when the field
//! passes. Document types assemble these into a [`ValidationReport`];
//! nothing short-circuits, so an editor sees every problem of a save
//! attempt at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{FieldError, Violation};
use crate::reference::{DocId, DocType};
use crate::slug::{self, Slug};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex"));
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static regex"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").expect("static regex"));

/// Seam to the hosting document store: is a slug already taken by
/// another document of the same type?
///
/// `excluding` carries the id of the document being saved, so that a
/// document keeping its own slug on update does not collide with itself.
pub trait SlugLookup {
    fn slug_taken(&self, doc_type: DocType, slug: &str, excluding: Option<&DocId>) -> bool;
}

/// Lookup that knows no other documents. Used when validating a
/// document in isolation.
pub struct NoLookup;

impl SlugLookup for NoLookup {
    fn slug_taken(&self, _doc_type: DocType, _slug: &str, _excluding: Option<&DocId>) -> bool {
        false
    }
}

/// Validation outcome for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub doc_type: DocType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(doc_type: DocType, id: Option<DocId>, violations: Vec<Violation>) -> Self {
        Self {
            doc_type,
            id,
            violations,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Push `error` onto `violations` under `path`, if there is one.
pub fn push(violations: &mut Vec<Violation>, path: impl Into<String>, error: Option<FieldError>) {
    if let Some(error) = error {
        violations.push(Violation::new(path, error));
    }
}

/// Required string: present and non-blank.
#[must_use]
pub fn required_str(value: Option<&str>) -> Option<FieldError> {
    match value {
        Some(s) if !s.trim().is_empty() => None,
        _ => Some(FieldError::Missing),
    }
}

/// Required field of any other shape.
#[must_use]
pub fn required<T>(value: Option<&T>) -> Option<FieldError> {
    if value.is_some() {
        None
    } else {
        Some(FieldError::Missing)
    }
}

/// String length within `[min, max]`, counted in characters.
#[must_use]
pub fn length_between(value: &str, min: usize, max: usize) -> Option<FieldError> {
    let actual = value.chars().count();
    if actual < min {
        Some(FieldError::TooShort { min, actual })
    } else if actual > max {
        Some(FieldError::TooLong { max, actual })
    } else {
        None
    }
}

/// String length at most `max` characters.
#[must_use]
pub fn max_chars(value: &str, max: usize) -> Option<FieldError> {
    let actual = value.chars().count();
    if actual > max {
        Some(FieldError::TooLong { max, actual })
    } else {
        None
    }
}

/// Integer within `[min, max]`.
#[must_use]
pub fn int_between(value: i64, min: i64, max: i64) -> Option<FieldError> {
    if value < min || value > max {
        Some(FieldError::OutOfRange {
            min,
            max,
            actual: value,
        })
    } else {
        None
    }
}

#[must_use]
pub fn email(value: &str) -> Option<FieldError> {
    if EMAIL.is_match(value) {
        None
    } else {
        Some(FieldError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

/// Six-digit hex color, e.g. `#1A2B3C`.
#[must_use]
pub fn hex_color(value: &str) -> Option<FieldError> {
    if HEX_COLOR.is_match(value) {
        None
    } else {
        Some(FieldError::PatternMismatch {
            value: value.to_string(),
        })
    }
}

/// Absolute http(s) URL.
#[must_use]
pub fn url(value: &str) -> Option<FieldError> {
    if URL.is_match(value) {
        None
    } else {
        Some(FieldError::InvalidUrl {
            value: value.to_string(),
        })
    }
}

/// Item count at most `max`.
#[must_use]
pub fn at_most_items(actual: usize, max: usize) -> Option<FieldError> {
    if actual > max {
        Some(FieldError::TooManyItems { max, actual })
    } else {
        None
    }
}

/// Full slug-field check: required, within length, unique for its type.
///
/// Returns the first failing check; a slug that is missing cannot also
/// collide.
#[must_use]
pub fn slug_field(
    value: Option<&Slug>,
    doc_type: DocType,
    id: Option<&DocId>,
    lookup: &dyn SlugLookup,
) -> Option<FieldError> {
    let Some(slug) = value else {
        return Some(FieldError::Missing);
    };
    if slug.current.trim().is_empty() {
        return Some(FieldError::Missing);
    }
    if let Some(error) = max_chars(&slug.current, slug::MAX_LENGTH) {
        return Some(error);
    }
    if lookup.slug_taken(doc_type, &slug.current, id) {
        return Some(FieldError::SlugTaken {
            doc_type: doc_type.as_str().to_string(),
            slug: slug.current.clone(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TakenLookup;

    impl SlugLookup for TakenLookup {
        fn slug_taken(&self, _: DocType, slug: &str, _: Option<&DocId>) -> bool {
            slug == "deja-pris"
        }
    }

    #[test]
    fn required_str_rejects_blank() {
        assert_eq!(required_str(None), Some(FieldError::Missing));
        assert_eq!(required_str(Some("  ")), Some(FieldError::Missing));
        assert_eq!(required_str(Some("ok")), None);
    }

    #[test]
    fn length_between_counts_characters_not_bytes() {
        // 10 accented characters, more than 10 bytes
        assert_eq!(length_between("éééééééééé", 10, 100), None);
        assert!(matches!(
            length_between("court", 10, 100),
            Some(FieldError::TooShort { min: 10, actual: 5 })
        ));
    }

    #[test]
    fn email_formats() {
        assert_eq!(email("jane.doe@example.org"), None);
        assert!(email("jane.doe@").is_some());
        assert!(email("pas un email").is_some());
    }

    #[test]
    fn hex_color_formats() {
        assert_eq!(hex_color("#A3F2C1"), None);
        assert!(hex_color("#fff").is_some());
        assert!(hex_color("A3F2C1").is_some());
        assert!(hex_color("#GGGGGG").is_some());
    }

    #[test]
    fn url_requires_http_scheme() {
        assert_eq!(url("https://example.org/a/b"), None);
        assert_eq!(url("http://example.org"), None);
        assert!(url("ftp://example.org").is_some());
        assert!(url("example.org").is_some());
    }

    #[test]
    fn int_between_bounds_inclusive() {
        assert_eq!(int_between(0, 0, 6), None);
        assert_eq!(int_between(6, 0, 6), None);
        assert!(int_between(7, 0, 6).is_some());
        assert!(int_between(-1, 0, 6).is_some());
    }

    #[test]
    fn slug_field_reports_collision() {
        let slug = Slug::new("deja-pris");
        let err = slug_field(Some(&slug), DocType::Post, None, &TakenLookup);
        assert!(matches!(err, Some(FieldError::SlugTaken { .. })));

        let free = Slug::new("libre");
        assert_eq!(slug_field(Some(&free), DocType::Post, None, &TakenLookup), None);
    }

    #[test]
    fn slug_field_requires_presence_and_length() {
        assert_eq!(
            slug_field(None, DocType::Post, None, &NoLookup),
            Some(FieldError::Missing)
        );
        let oversized = Slug::new("a".repeat(97));
        assert!(matches!(
            slug_field(Some(&oversized), DocType::Post, None, &NoLookup),
            Some(FieldError::TooLong { max: 96, actual: 97 })
        ));
    }
}
