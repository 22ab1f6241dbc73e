//! Preview projection — the `{title, subtitle, media}` triple shown in
//! list and reference pickers by the hosting studio.

use serde::Serialize;

use crate::image::ImageField;

/// Read-only projection of a document for list display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<ImageField>,
}

impl Preview {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            media: None,
        }
    }
}

/// Join the non-empty parts with a single space, `None` if nothing is left.
///
/// This is how composite subtitles are assembled: each part is omitted
/// entirely when its underlying field is absent.
#[must_use]
pub fn join_nonempty(parts: &[Option<String>]) -> Option<String> {
    let joined = parts
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
