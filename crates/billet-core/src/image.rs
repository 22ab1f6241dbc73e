//! Image field type shared by every document.
//!
//! The asset itself (upload, derived metadata, crops) belongs to the
//! hosting platform's image pipeline; this type only carries the asset
//! handle and the editorial fields attached to it. One invariant holds
//! everywhere: an image without non-empty alternative text does not
//! validate, whichever document embeds it.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Focal-point crop hint stored alongside an image asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Derived metadata the hosting image pipeline can be asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMetadataKind {
    Blurhash,
    Lqip,
    Palette,
}

/// An image with its editorial companion fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageField {
    /// Asset handle in the hosting store. Absent on an untouched draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,

    /// Alternative text. Required, non-empty, everywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

impl ImageField {
    pub fn with_alt(asset: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
            alt: Some(alt.into()),
            ..Self::default()
        }
    }

    /// Check the alt-text invariant, with an optional minimum length on
    /// top of the global non-empty requirement.
    #[must_use]
    pub fn alt_violation(&self, min_chars: usize) -> Option<FieldError> {
        let alt = self.alt.as_deref().map(str::trim).unwrap_or("");
        if alt.is_empty() {
            return Some(FieldError::MissingAltText);
        }
        let actual = alt.chars().count();
        if actual < min_chars {
            return Some(FieldError::TooShort {
                min: min_chars,
                actual,
            });
        }
        None
    }
}
