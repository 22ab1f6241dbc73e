//! Content nodes — the heterogeneous members of a rich content sequence.

use serde::{Deserialize, Serialize};

use billet_core::error::Violation;
use billet_core::image::ImageField;
use billet_core::validate;

use crate::block::TextBlock;

/// Tone of a callout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Info,
    Warning,
    Success,
    Error,
}

/// A highlighted aside in the content flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Callout {
    #[serde(rename = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CalloutKind>,
}

/// One node of a rich content sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum ContentNode {
    Block(TextBlock),
    Image(ImageField),
    Callout(Callout),
}

/// An ordered sequence of heterogeneous content nodes — the body of a
/// post or any other long-form field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichContent(pub Vec<ContentNode>);

impl RichContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentNode> {
        self.0.iter()
    }

    /// Validate every node, anchoring violations under `prefix[i]`.
    ///
    /// Embedded images obey the global alt-text invariant; text blocks
    /// check their annotations.
    #[must_use]
    pub fn validate(&self, prefix: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (index, node) in self.0.iter().enumerate() {
            let path = format!("{prefix}[{index}]");
            match node {
                ContentNode::Block(block) => {
                    violations.extend(block.validate(&path));
                }
                ContentNode::Image(image) => {
                    validate::push(
                        &mut violations,
                        format!("{path}.alt"),
                        image.alt_violation(0),
                    );
                }
                ContentNode::Callout(_) => {}
            }
        }
        violations
    }
}

impl From<Vec<ContentNode>> for RichContent {
    fn from(nodes: Vec<ContentNode>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a RichContent {
    type Item = &'a ContentNode;
    type IntoIter = std::slice::Iter<'a, ContentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_core::error::FieldError;

    #[test]
    fn nodes_deserialize_by_type_tag() {
        let content: RichContent = serde_json::from_value(serde_json::json!([
            {"_type": "block", "style": "h2", "children": [{"text": "Introduction"}]},
            {"_type": "image", "asset": "image-1", "alt": "Une carte de la région"},
            {"_type": "callout", "text": "À noter", "type": "info"}
        ]))
        .expect("parse");

        assert_eq!(content.len(), 3);
        assert!(matches!(content.0[0], ContentNode::Block(_)));
        assert!(matches!(content.0[1], ContentNode::Image(_)));
        assert!(matches!(content.0[2], ContentNode::Callout(_)));
    }

    #[test]
    fn embedded_image_without_alt_fails() {
        let content: RichContent = serde_json::from_value(serde_json::json!([
            {"_type": "block", "children": [{"text": "Texte"}]},
            {"_type": "image", "asset": "image-1"}
        ]))
        .expect("parse");

        let violations = content.validate("content");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "content[1].alt");
        assert_eq!(violations[0].error, FieldError::MissingAltText);
    }

    #[test]
    fn callout_kind_rejects_unknown_values() {
        let result: Result<Callout, _> = serde_json::from_value(serde_json::json!({
            "text": "Attention",
            "type": "danger"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn valid_content_produces_no_violations() {
        let content = RichContent(vec![
            ContentNode::Block(TextBlock::paragraph("Un paragraphe sans histoire.")),
            ContentNode::Image(ImageField::with_alt("image-2", "Portrait de l'autrice")),
            ContentNode::Callout(Callout {
                text: Some("Bon à savoir".to_string()),
                kind: Some(CalloutKind::Success),
                ..Callout::default()
            }),
        ]);
        assert!(content.validate("content").is_empty());
    }
}
