//! Document identity and cross-document references.

use serde::{Deserialize, Serialize};

use crate::error::BilletError;

/// Opaque document identifier, assigned by the hosting document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The addressable document types of the content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Author,
    Category,
    Post,
}

impl DocType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Author => "author",
            DocType::Category => "category",
            DocType::Post => "post",
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = BilletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author" => Ok(DocType::Author),
            "category" => Ok(DocType::Category),
            "post" => Ok(DocType::Post),
            other => Err(BilletError::UnknownDocType(other.to_string())),
        }
    }
}

/// A reference to another document, stored as `{ "_ref": "<id>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: DocId,
}

impl Reference {
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            id: DocId::new(id),
        }
    }
}

/// Edit-time filter applied to a reference picker.
///
/// `ExcludeSelf` removes the current document's own id from the
/// selectable set. It blocks direct self-reference only; longer cycles
/// through several documents are not detected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceFilter {
    ExcludeSelf,
}
