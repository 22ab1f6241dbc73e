//! Text block — styled paragraphs with inline marks and annotations.

use serde::{Deserialize, Serialize};

use billet_core::error::{FieldError, Violation};
use billet_core::reference::Reference;
use billet_core::validate;

/// Paragraph-level style of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    #[default]
    Normal,
    H2,
    H3,
    H4,
    Blockquote,
}

/// List rendering of a text block, when it is part of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Bullet,
    Number,
    Check,
}

/// Inline decorators editors can toggle on a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decorator {
    Strong,
    Em,
    Underline,
    Code,
    Highlight,
}

impl Decorator {
    pub const ALL: [Decorator; 5] = [
        Decorator::Strong,
        Decorator::Em,
        Decorator::Underline,
        Decorator::Code,
        Decorator::Highlight,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Decorator::Strong => "strong",
            Decorator::Em => "em",
            Decorator::Underline => "underline",
            Decorator::Code => "code",
            Decorator::Highlight => "highlight",
        }
    }
}

/// A run of text with its active marks. A mark is either a decorator
/// name or the `_key` of an annotation in the block's `markDefs`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<String>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

/// Annotation attached to a span of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum Annotation {
    /// External link. Opens in a new tab unless the editor opts out.
    Link {
        #[serde(skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        #[serde(default = "default_true")]
        blank: bool,
    },
    /// Link to another document of the model.
    InternalLink {
        #[serde(skip_serializing_if = "Option::is_none")]
        reference: Option<Reference>,
    },
}

fn default_true() -> bool {
    true
}

/// An [`Annotation`] keyed for span marks to point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(flatten)]
    pub annotation: Annotation,
}

/// A styled block of rich text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub style: BlockStyle,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListStyle>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Span>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mark_defs: Vec<MarkDef>,
}

impl TextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            children: vec![Span::plain(text)],
            ..Self::default()
        }
    }

    /// Concatenated text of all spans.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(|span| span.text.as_str())
            .collect()
    }

    /// Check every annotation of this block; external links need a
    /// valid, present URL.
    #[must_use]
    pub fn validate(&self, path: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (index, def) in self.mark_defs.iter().enumerate() {
            if let Annotation::Link { href, .. } = &def.annotation {
                let href_path = format!("{path}.markDefs[{index}].href");
                match href.as_deref() {
                    None | Some("") => {
                        violations.push(Violation::new(href_path, FieldError::Missing));
                    }
                    Some(value) => {
                        validate::push(&mut violations, href_path, validate::url(value));
                    }
                }
            }
        }
        violations
    }
}
