//! Author document type.

use serde::{Deserialize, Serialize};

use billet_core::field::{
    DocumentSchema, FieldDef, FieldGroup, FieldOptions, FieldType, Rule, SelectEntry, SlugStrategy,
};
use billet_core::image::ImageField;
use billet_core::preview::{join_nonempty, Preview};
use billet_core::reference::{DocId, DocType};
use billet_core::slug::{self, Slug};
use billet_core::validate::{self, SlugLookup, ValidationReport};
use billet_content::RichContent;

/// Social profiles of an author. All optional, all URL-checked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    fn entries(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("twitter", self.twitter.as_deref()),
            ("linkedin", self.linkedin.as_deref()),
            ("github", self.github.as_deref()),
            ("website", self.website.as_deref()),
        ]
    }
}

/// An author, as edited in the studio. Draft-shaped: requiredness is
/// enforced by [`Author::validate`], not by deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageField>,

    #[serde(default, skip_serializing_if = "RichContent::is_empty")]
    pub bio: RichContent,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expertise: Vec<String>,

    #[serde(default, skip_serializing_if = "is_default_links")]
    pub social_links: SocialLinks,
}

fn is_default_links(links: &SocialLinks) -> bool {
    *links == SocialLinks::default()
}

impl Author {
    /// Derive the slug from the `{firstName}-{lastName}` template through
    /// the platform's default generator. Unlike post slugs, no symbol
    /// stripping happens here.
    #[must_use]
    pub fn derive_slug(&self) -> Option<Slug> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => {
                Some(Slug::new(slug::default_slugify(&format!("{first}-{last}"))))
            }
            _ => None,
        }
    }

    /// Save-time validation of the whole record.
    #[must_use]
    pub fn validate(&self, lookup: &dyn SlugLookup) -> ValidationReport {
        let mut violations = Vec::new();

        validate::push(
            &mut violations,
            "firstName",
            validate::required_str(self.first_name.as_deref()),
        );
        validate::push(
            &mut violations,
            "lastName",
            validate::required_str(self.last_name.as_deref()),
        );
        validate::push(
            &mut violations,
            "slug",
            validate::slug_field(
                self.slug.as_ref(),
                DocType::Author,
                self.id.as_ref(),
                lookup,
            ),
        );
        if let Some(image) = &self.image {
            validate::push(&mut violations, "image.alt", image.alt_violation(0));
        }
        violations.extend(self.bio.validate("bio"));
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            validate::push(&mut violations, "email", validate::email(email));
        }
        for (name, value) in self.social_links.entries() {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                validate::push(
                    &mut violations,
                    format!("socialLinks.{name}"),
                    validate::url(value),
                );
            }
        }

        ValidationReport::new(DocType::Author, self.id.clone(), violations)
    }

    /// List projection: `"{firstName} {lastName}"` with the photo as media.
    #[must_use]
    pub fn preview(&self) -> Preview {
        let title = join_nonempty(&[self.first_name.clone(), self.last_name.clone()])
            .unwrap_or_else(|| "Sans titre".to_string());
        Preview {
            title,
            subtitle: None,
            media: self.image.clone(),
        }
    }
}

/// Declarative schema of the author type.
#[must_use]
pub fn schema() -> DocumentSchema {
    DocumentSchema {
        name: DocType::Author.as_str().to_string(),
        title: "Auteurs".to_string(),
        icon: Some("user".to_string()),
        groups: vec![
            FieldGroup::new("personal", "Informations personnelles"),
            FieldGroup::new("social", "Réseaux sociaux"),
            FieldGroup::new("professional", "Informations professionnelles"),
        ],
        fields: vec![
            FieldDef::new("firstName", FieldType::String)
                .with_title("Prénom")
                .with_rule(Rule::Required)
                .with_group("personal"),
            FieldDef::new("lastName", FieldType::String)
                .with_title("Nom")
                .with_rule(Rule::Required)
                .with_group("personal"),
            FieldDef::new("slug", FieldType::Slug)
                .with_title("Slug")
                .with_rule(Rule::Required)
                .with_group("personal")
                .with_options(FieldOptions {
                    source: Some("{firstName}-{lastName}".to_string()),
                    max_length: Some(slug::MAX_LENGTH),
                    slugify: Some(SlugStrategy::Default),
                    ..FieldOptions::default()
                }),
            FieldDef::new("image", FieldType::Image)
                .with_title("Photo")
                .with_group("personal")
                .with_options(FieldOptions {
                    hotspot: true,
                    ..FieldOptions::default()
                })
                .with_field(
                    FieldDef::new("alt", FieldType::String)
                        .with_title("Texte alternatif")
                        .with_rule(Rule::Required),
                ),
            FieldDef::new("bio", FieldType::Array)
                .with_title("Biographie")
                .with_group("personal")
                .with_member(FieldDef::new("block", FieldType::Block)),
            FieldDef::new("email", FieldType::String)
                .with_title("Email")
                .with_rule(Rule::Email)
                .with_group("personal"),
            FieldDef::new("role", FieldType::String)
                .with_title("Rôle")
                .with_group("professional"),
            FieldDef::new("expertise", FieldType::Array)
                .with_title("Domaines d'expertise")
                .with_group("professional")
                .with_member(FieldDef::new("tag", FieldType::String))
                .with_options(FieldOptions {
                    layout: Some(billet_core::field::Layout::Tags),
                    ..FieldOptions::default()
                }),
            FieldDef::new("socialLinks", FieldType::Object)
                .with_title("Réseaux sociaux")
                .with_group("social")
                .with_field(FieldDef::new("twitter", FieldType::Url).with_title("Twitter"))
                .with_field(FieldDef::new("linkedin", FieldType::Url).with_title("LinkedIn"))
                .with_field(FieldDef::new("github", FieldType::Url).with_title("GitHub"))
                .with_field(FieldDef::new("website", FieldType::Url).with_title("Site web")),
        ],
        orderings: Vec::new(),
        select: vec![
            SelectEntry::new("title", "firstName"),
            SelectEntry::new("subtitle", "lastName"),
            SelectEntry::new("media", "image"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_core::error::FieldError;
    use billet_core::validate::NoLookup;

    fn complete_author() -> Author {
        Author {
            id: Some(DocId::new("author-1")),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            slug: Some(Slug::new("jane-doe")),
            image: Some(ImageField::with_alt("image-jane", "Portrait de Jane Doe")),
            email: Some("jane.doe@exemple.fr".to_string()),
            role: Some("Rédactrice en chef".to_string()),
            ..Author::default()
        }
    }

    #[test]
    fn complete_author_validates() {
        let report = complete_author().validate(&NoLookup);
        assert!(report.is_valid(), "unexpected: {:?}", report.violations);
    }

    #[test]
    fn names_are_required() {
        let author = Author::default();
        let report = author.validate(&NoLookup);
        let paths: Vec<&str> = report.violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"firstName"));
        assert!(paths.contains(&"lastName"));
        assert!(paths.contains(&"slug"));
    }

    #[test]
    fn email_format_is_checked_when_present() {
        let mut author = complete_author();
        author.email = Some("pas-un-email".to_string());
        let report = author.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "email" && matches!(v.error, FieldError::InvalidEmail { .. })));
    }

    #[test]
    fn social_links_must_be_urls() {
        let mut author = complete_author();
        author.social_links.github = Some("github.com/janedoe".to_string());
        author.social_links.website = Some("https://janedoe.fr".to_string());
        let report = author.validate(&NoLookup);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].path, "socialLinks.github");
    }

    #[test]
    fn photo_requires_alt_text() {
        let mut author = complete_author();
        author.image = Some(ImageField {
            asset: Some("image-jane".to_string()),
            ..ImageField::default()
        });
        let report = author.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "image.alt" && v.error == FieldError::MissingAltText));
    }

    #[test]
    fn slug_derivation_uses_default_generator() {
        let author = complete_author();
        assert_eq!(author.derive_slug(), Some(Slug::new("jane-doe")));

        // Accents survive the default generator; only the post
        // normalizer strips them.
        let author = Author {
            first_name: Some("Émilie".to_string()),
            last_name: Some("Durand".to_string()),
            ..Author::default()
        };
        assert_eq!(author.derive_slug(), Some(Slug::new("émilie-durand")));
    }

    #[test]
    fn preview_title_joins_names_with_single_space() {
        let preview = complete_author().preview();
        assert_eq!(preview.title, "Jane Doe");
        assert_eq!(preview.subtitle, None);
        assert!(preview.media.is_some());
    }

    #[test]
    fn schema_declares_groups_and_slug_source() {
        let schema = schema();
        assert_eq!(schema.name, "author");
        assert_eq!(schema.groups.len(), 3);
        let slug = schema.field("slug").expect("slug field");
        let options = slug.options.as_ref().expect("slug options");
        assert_eq!(options.source.as_deref(), Some("{firstName}-{lastName}"));
        assert_eq!(options.slugify, Some(SlugStrategy::Default));
    }
}
