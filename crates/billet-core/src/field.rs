//! Declarative schema surface.
//!
//! These types describe the content model to the hosting studio: field
//! names and types, titles and descriptions shown to editors, grouping,
//! UI options, validation rules, orderings, and preview selections. The
//! whole surface serializes to JSON; the studio renders it, and its rule
//! engine mirrors the checks implemented in [`crate::validate`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::image::ImageMetadataKind;
use crate::reference::{DocType, ReferenceFilter};

/// Field primitives supplied by the hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Text,
    Slug,
    Image,
    Reference,
    Array,
    Object,
    Datetime,
    Url,
    Number,
    Boolean,
    Block,
}

/// Validation rule vocabulary of the hosting platform's rule engine.
///
/// `min`/`max` bound string lengths, numeric values, or item counts
/// depending on the field type they are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "lowercase")]
pub enum Rule {
    Required,
    Min(i64),
    Max(i64),
    Email,
    Regex(String),
    Unique,
}

/// Which slug generator a slug field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugStrategy {
    /// The platform default: trim, lowercase, whitespace to hyphens.
    Default,
    /// The custom post normalizer, which also strips symbols.
    Normalized,
}

/// Editor layout hint for list-like fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Tags,
    Radio,
}

/// One selectable choice for an enumerated string field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListOption {
    pub title: String,
    pub value: String,
}

impl ListOption {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// Initial value applied by the editor when a document is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialValue {
    /// Current timestamp at creation time.
    Now,
    #[serde(untagged)]
    Value(serde_json::Value),
}

/// UI and behaviour options attached to a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    /// Source field (or template) a slug is derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slugify: Option<SlugStrategy>,

    /// Enable focal-point cropping on an image field.
    #[serde(default)]
    pub hotspot: bool,

    /// Derived metadata requested from the image pipeline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<ImageMetadataKind>,

    /// Subfield the AI assistant writes suggested alt text into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_assist_field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<ListOption>,

    /// Edit-time filter on a reference picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ReferenceFilter>,

    /// Forbid creating new documents from inside the picker.
    #[serde(default)]
    pub disable_new: bool,
}

/// Rich-text declaration attached to a `block` member: which styles,
/// list styles, inline decorators, and annotations editors may use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<ListOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<ListOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<ListOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<FieldDef>,
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Editorial group this field is shown under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,

    /// Member declarations for array fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub of: Vec<FieldDef>,

    /// Target document types for reference fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<DocType>,

    /// Subfields for object and image fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<InitialValue>,

    /// Rich-text declaration, only meaningful on `block` members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockDef>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            title: None,
            field_type,
            description: None,
            group: None,
            rules: Vec::new(),
            of: Vec::new(),
            to: Vec::new(),
            fields: Vec::new(),
            options: None,
            initial: None,
            block: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: FieldDef) -> Self {
        self.of.push(member);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: DocType) -> Self {
        self.to.push(target);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn with_initial(mut self, initial: InitialValue) -> Self {
        self.initial = Some(initial);
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: BlockDef) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// Declared `min` bound, if any.
    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::Min(value) => Some(*value),
            _ => None,
        })
    }

    /// Declared `max` bound, if any.
    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::Max(value) => Some(*value),
            _ => None,
        })
    }
}

/// Editorial group shown as a tab in the studio form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub name: String,
    pub title: String,
}

impl FieldGroup {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// A named sort order offered in document lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ordering {
    pub name: String,
    pub title: String,
    pub by: Vec<OrderBy>,
}

impl Ordering {
    pub fn by_field(
        name: impl Into<String>,
        title: impl Into<String>,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            by: vec![OrderBy {
                field: field.into(),
                direction,
            }],
        }
    }
}

/// One entry of a preview selection: which document path feeds which
/// projection slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectEntry {
    pub alias: String,
    pub path: String,
}

impl SelectEntry {
    pub fn new(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: path.into(),
        }
    }
}

/// Declaration of a top-level, addressable document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSchema {
    pub name: String,
    pub title: String,

    /// Studio icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<FieldGroup>,

    pub fields: Vec<FieldDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orderings: Vec<Ordering>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<SelectEntry>,
}

impl DocumentSchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Declaration of a reusable, non-addressable array type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    pub name: String,
    pub title: String,
    pub of: Vec<FieldDef>,
}

/// Any entry of the schema registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaType {
    Document(DocumentSchema),
    Array(ArraySchema),
}

impl SchemaType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Document(doc) => &doc.name,
            SchemaType::Array(array) => &array.name,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
