//! Category document type — hierarchical classification.

use serde::{Deserialize, Serialize};

use billet_core::error::{FieldError, Violation};
use billet_core::field::{
    DocumentSchema, FieldDef, FieldOptions, FieldType, Rule, SelectEntry, SlugStrategy,
};
use billet_core::image::ImageField;
use billet_core::preview::Preview;
use billet_core::reference::{DocId, DocType, Reference, ReferenceFilter};
use billet_core::slug::{self, Slug};
use billet_core::validate::{self, SlugLookup, ValidationReport};

/// Hex color pattern declared to the studio rule engine.
pub const COLOR_PATTERN: &str = "^#[0-9A-Fa-f]{6}$";

/// A category, possibly nested under a parent category.
///
/// The parent picker excludes the category itself, and saving a
/// category as its own parent is rejected. Longer cycles through
/// several categories are not detected — parent chains are walked by
/// the hosting platform, not here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageField>,

    /// Hex color, e.g. `#1A6B3F`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
}

impl Category {
    /// Derive the slug from the title through the platform's default
    /// generator.
    #[must_use]
    pub fn derive_slug(&self) -> Option<Slug> {
        self.title
            .as_deref()
            .map(|title| Slug::new(slug::default_slugify(title)))
    }

    /// Save-time validation of the whole record.
    #[must_use]
    pub fn validate(&self, lookup: &dyn SlugLookup) -> ValidationReport {
        let mut violations = Vec::new();

        validate::push(
            &mut violations,
            "title",
            validate::required_str(self.title.as_deref()),
        );
        validate::push(
            &mut violations,
            "slug",
            validate::slug_field(
                self.slug.as_ref(),
                DocType::Category,
                self.id.as_ref(),
                lookup,
            ),
        );
        if let Some(icon) = &self.icon {
            validate::push(&mut violations, "icon.alt", icon.alt_violation(0));
        }
        if let Some(color) = self.color.as_deref().filter(|c| !c.is_empty()) {
            validate::push(&mut violations, "color", validate::hex_color(color));
        }
        if let (Some(parent), Some(id)) = (&self.parent, &self.id) {
            if &parent.id == id {
                violations.push(Violation::new("parent", FieldError::SelfReference));
            }
        }

        ValidationReport::new(DocType::Category, self.id.clone(), violations)
    }

    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| "Sans titre".to_string()),
            subtitle: self.description.clone(),
            media: self.icon.clone(),
        }
    }
}

/// Declarative schema of the category type.
#[must_use]
pub fn schema() -> DocumentSchema {
    DocumentSchema {
        name: DocType::Category.as_str().to_string(),
        title: "Catégories".to_string(),
        icon: Some("tag".to_string()),
        groups: Vec::new(),
        fields: vec![
            FieldDef::new("title", FieldType::String)
                .with_title("Titre")
                .with_rule(Rule::Required),
            FieldDef::new("slug", FieldType::Slug)
                .with_title("Slug")
                .with_rule(Rule::Required)
                .with_options(FieldOptions {
                    source: Some("title".to_string()),
                    max_length: Some(slug::MAX_LENGTH),
                    slugify: Some(SlugStrategy::Default),
                    ..FieldOptions::default()
                }),
            FieldDef::new("description", FieldType::Text).with_title("Description"),
            FieldDef::new("icon", FieldType::Image)
                .with_title("Icône")
                .with_options(FieldOptions {
                    hotspot: true,
                    ..FieldOptions::default()
                })
                .with_field(
                    FieldDef::new("alt", FieldType::String)
                        .with_title("Texte alternatif")
                        .with_rule(Rule::Required),
                ),
            FieldDef::new("color", FieldType::String)
                .with_title("Couleur")
                .with_description("Code couleur hexadécimal")
                .with_rule(Rule::Regex(COLOR_PATTERN.to_string())),
            // The filter keeps a category from picking itself as parent.
            FieldDef::new("parent", FieldType::Reference)
                .with_title("Catégorie parente")
                .with_target(DocType::Category)
                .with_options(FieldOptions {
                    filter: Some(ReferenceFilter::ExcludeSelf),
                    ..FieldOptions::default()
                }),
        ],
        orderings: Vec::new(),
        select: vec![
            SelectEntry::new("title", "title"),
            SelectEntry::new("subtitle", "description"),
            SelectEntry::new("media", "icon"),
        ],
    }
}
