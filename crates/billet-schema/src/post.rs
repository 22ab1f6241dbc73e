//! Post document type — the primary content record.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billet_core::error::{FieldError, Violation};
use billet_core::field::{
    DocumentSchema, FieldDef, FieldGroup, FieldOptions, FieldType, InitialValue, Layout,
    ListOption, Ordering, Rule, SelectEntry, SlugStrategy, SortDirection,
};
use billet_core::image::{ImageField, ImageMetadataKind};
use billet_core::preview::{join_nonempty, Preview};
use billet_core::reference::{DocId, DocType, Reference, ReferenceFilter};
use billet_core::slug::{self, Slug};
use billet_core::validate::{self, SlugLookup, ValidationReport};
use billet_content::{RichContent, RICH_CONTENT_TYPE};

use crate::author::Author;
use crate::recommendation::RecommendationSettings;

pub const TITLE_MIN: usize = 10;
pub const TITLE_MAX: usize = 100;
pub const SUBTITLE_MAX: usize = 150;
pub const EXCERPT_MIN: usize = 50;
pub const EXCERPT_MAX: usize = 160;
pub const COVER_ALT_MIN: usize = 10;
pub const SEO_TITLE_MAX: usize = 60;
pub const SEO_DESCRIPTION_MAX: usize = 160;
pub const RECOMMENDED_POSTS_MAX: usize = 6;

/// A blog post, as edited in the studio. Draft-shaped: requiredness is
/// enforced by [`Post::validate`], not by deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<RichContent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageField>,

    /// Defaults to the creation time in the editor (see [`schema`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_image: Option<ImageField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    /// Manually curated recommendations. Never the post itself, never
    /// duplicated, at most [`RECOMMENDED_POSTS_MAX`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_posts: Vec<Reference>,

    /// Free-form tags feeding the external recommendation engine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_topics: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_settings: Option<RecommendationSettings>,
}

impl Post {
    /// Derive the slug from the title through the custom normalizer.
    #[must_use]
    pub fn derive_slug(&self) -> Option<Slug> {
        self.title
            .as_deref()
            .map(|title| Slug::new(slug::normalize(title)))
    }

    /// Recommendation settings with defaults applied when the object is
    /// absent from the document.
    #[must_use]
    pub fn recommendation_settings(&self) -> RecommendationSettings {
        self.recommendation_settings.clone().unwrap_or_default()
    }

    /// Save-time validation of the whole record.
    #[must_use]
    pub fn validate(&self, lookup: &dyn SlugLookup) -> ValidationReport {
        let mut violations = Vec::new();

        match self.title.as_deref() {
            None | Some("") => {
                violations.push(Violation::new("title", FieldError::Missing));
            }
            Some(title) => {
                validate::push(
                    &mut violations,
                    "title",
                    validate::length_between(title, TITLE_MIN, TITLE_MAX),
                );
            }
        }
        validate::push(
            &mut violations,
            "slug",
            validate::slug_field(self.slug.as_ref(), DocType::Post, self.id.as_ref(), lookup),
        );
        if let Some(subtitle) = self.subtitle.as_deref() {
            validate::push(
                &mut violations,
                "subtitle",
                validate::max_chars(subtitle, SUBTITLE_MAX),
            );
        }
        if let Some(content) = &self.content {
            violations.extend(content.validate("content"));
        }
        if let Some(excerpt) = self.excerpt.as_deref() {
            validate::push(
                &mut violations,
                "excerpt",
                validate::length_between(excerpt, EXCERPT_MIN, EXCERPT_MAX),
            );
        }
        match &self.cover_image {
            None => violations.push(Violation::new("coverImage", FieldError::Missing)),
            Some(cover) => {
                validate::push(
                    &mut violations,
                    "coverImage.alt",
                    cover.alt_violation(COVER_ALT_MIN),
                );
            }
        }
        validate::push(
            &mut violations,
            "author",
            validate::required(self.author.as_ref()),
        );
        if self.categories.is_empty() {
            violations.push(Violation::new(
                "categories",
                FieldError::TooFewItems { min: 1 },
            ));
        }
        if let Some(seo_title) = self.seo_title.as_deref() {
            validate::push(
                &mut violations,
                "seoTitle",
                validate::max_chars(seo_title, SEO_TITLE_MAX),
            );
        }
        if let Some(seo_description) = self.seo_description.as_deref() {
            validate::push(
                &mut violations,
                "seoDescription",
                validate::max_chars(seo_description, SEO_DESCRIPTION_MAX),
            );
        }
        if let Some(social) = &self.social_image {
            validate::push(&mut violations, "socialImage.alt", social.alt_violation(0));
        }
        if let Some(url) = self.canonical_url.as_deref().filter(|u| !u.is_empty()) {
            validate::push(&mut violations, "canonicalUrl", validate::url(url));
        }
        self.validate_recommended_posts(&mut violations);
        if let Some(settings) = &self.recommendation_settings {
            violations.extend(settings.validate("recommendationSettings"));
        }

        ValidationReport::new(DocType::Post, self.id.clone(), violations)
    }

    fn validate_recommended_posts(&self, violations: &mut Vec<Violation>) {
        validate::push(
            violations,
            "recommendedPosts",
            validate::at_most_items(self.recommended_posts.len(), RECOMMENDED_POSTS_MAX),
        );

        let mut seen = HashSet::new();
        for (index, reference) in self.recommended_posts.iter().enumerate() {
            let path = format!("recommendedPosts[{index}]");
            if Some(&reference.id) == self.id.as_ref() {
                violations.push(Violation::new(path, FieldError::SelfReference));
            } else if !seen.insert(&reference.id) {
                violations.push(Violation::new(
                    path,
                    FieldError::Duplicate {
                        value: reference.id.to_string(),
                    },
                ));
            }
        }
    }

    /// List projection. The author record, when resolvable, feeds the
    /// `par Prénom Nom` part; the publication date feeds `le jj/mm/aaaa`.
    /// Absent parts are omitted, remaining parts joined with one space.
    #[must_use]
    pub fn preview(&self, author: Option<&Author>) -> Preview {
        let author_part = author.and_then(|author| {
            match (author.first_name.as_deref(), author.last_name.as_deref()) {
                (Some(first), Some(last)) => Some(format!("par {first} {last}")),
                _ => None,
            }
        });
        let date_part = self
            .published_at
            .map(|date| format!("le {}", date.format("%d/%m/%Y")));

        Preview {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| "Sans titre".to_string()),
            subtitle: join_nonempty(&[author_part, date_part]),
            media: self.cover_image.clone(),
        }
    }
}

/// Declarative schema of the post type.
#[must_use]
pub fn schema() -> DocumentSchema {
    DocumentSchema {
        name: DocType::Post.as_str().to_string(),
        title: "Articles du Blog".to_string(),
        icon: Some("document-text".to_string()),
        groups: vec![
            FieldGroup::new("content", "Contenu"),
            FieldGroup::new("meta", "Métadonnées"),
            FieldGroup::new("seo", "SEO & Social"),
            FieldGroup::new("recommendations", "Recommandations"),
        ],
        fields: vec![
            FieldDef::new("title", FieldType::String)
                .with_title("Titre")
                .with_rule(Rule::Required)
                .with_rule(Rule::Min(TITLE_MIN as i64))
                .with_rule(Rule::Max(TITLE_MAX as i64))
                .with_group("content"),
            FieldDef::new("slug", FieldType::Slug)
                .with_title("Slug URL")
                .with_description("URL unique de l'article (généré automatiquement)")
                .with_rule(Rule::Required)
                .with_group("content")
                .with_options(FieldOptions {
                    source: Some("title".to_string()),
                    max_length: Some(slug::MAX_LENGTH),
                    slugify: Some(SlugStrategy::Normalized),
                    ..FieldOptions::default()
                }),
            FieldDef::new("subtitle", FieldType::String)
                .with_title("Sous-titre")
                .with_rule(Rule::Max(SUBTITLE_MAX as i64))
                .with_group("content"),
            FieldDef::new("content", FieldType::Array)
                .with_title("Contenu")
                .with_group("content")
                .with_member(FieldDef::new(RICH_CONTENT_TYPE, FieldType::Block)),
            FieldDef::new("excerpt", FieldType::Text)
                .with_title("Extrait")
                .with_description("Bref résumé de l'article (150-160 caractères recommandés)")
                .with_rule(Rule::Min(EXCERPT_MIN as i64))
                .with_rule(Rule::Max(EXCERPT_MAX as i64))
                .with_group("content"),
            FieldDef::new("coverImage", FieldType::Image)
                .with_title("Image principale")
                .with_rule(Rule::Required)
                .with_group("content")
                .with_options(FieldOptions {
                    hotspot: true,
                    metadata: vec![
                        ImageMetadataKind::Blurhash,
                        ImageMetadataKind::Lqip,
                        ImageMetadataKind::Palette,
                    ],
                    ai_assist_field: Some("alt".to_string()),
                    ..FieldOptions::default()
                })
                .with_field(
                    FieldDef::new("alt", FieldType::String)
                        .with_title("Texte alternatif")
                        .with_description("Description de l'image pour le SEO et l'accessibilité")
                        .with_rule(Rule::Required)
                        .with_rule(Rule::Min(COVER_ALT_MIN as i64)),
                )
                .with_field(FieldDef::new("caption", FieldType::String).with_title("Légende"))
                .with_field(FieldDef::new("credit", FieldType::String).with_title("Crédit photo")),
            FieldDef::new("publishedAt", FieldType::Datetime)
                .with_title("Date de publication")
                .with_initial(InitialValue::Now)
                .with_group("meta"),
            FieldDef::new("updatedAt", FieldType::Datetime)
                .with_title("Dernière mise à jour")
                .with_group("meta"),
            FieldDef::new("author", FieldType::Reference)
                .with_title("Auteur")
                .with_rule(Rule::Required)
                .with_target(DocType::Author)
                .with_group("meta"),
            FieldDef::new("categories", FieldType::Array)
                .with_title("Catégories")
                .with_rule(Rule::Required)
                .with_rule(Rule::Min(1))
                .with_group("meta")
                .with_member(
                    FieldDef::new("category", FieldType::Reference).with_target(DocType::Category),
                ),
            FieldDef::new("tags", FieldType::Array)
                .with_title("Tags")
                .with_group("meta")
                .with_member(FieldDef::new("tag", FieldType::String))
                .with_options(FieldOptions {
                    layout: Some(Layout::Tags),
                    ..FieldOptions::default()
                }),
            FieldDef::new("seoTitle", FieldType::String)
                .with_title("Titre SEO")
                .with_description("Titre optimisé pour les moteurs de recherche (50-60 caractères)")
                .with_rule(Rule::Max(SEO_TITLE_MAX as i64))
                .with_group("seo"),
            FieldDef::new("seoDescription", FieldType::Text)
                .with_title("Description SEO")
                .with_description("Description pour les résultats de recherche (150-160 caractères)")
                .with_rule(Rule::Max(SEO_DESCRIPTION_MAX as i64))
                .with_group("seo"),
            FieldDef::new("socialImage", FieldType::Image)
                .with_title("Image pour réseaux sociaux")
                .with_description("Image optimisée pour le partage (1200x630px recommandé)")
                .with_group("seo")
                .with_options(FieldOptions {
                    hotspot: true,
                    ..FieldOptions::default()
                })
                .with_field(
                    FieldDef::new("alt", FieldType::String)
                        .with_title("Texte alternatif")
                        .with_rule(Rule::Required),
                ),
            FieldDef::new("canonicalUrl", FieldType::Url)
                .with_title("URL Canonique")
                .with_description("URL canonique si différente de l'URL par défaut")
                .with_group("seo"),
            FieldDef::new("recommendedPosts", FieldType::Array)
                .with_title("Articles recommandés")
                .with_description("Sélectionnez manuellement les articles à recommander")
                .with_rule(Rule::Unique)
                .with_rule(Rule::Max(RECOMMENDED_POSTS_MAX as i64))
                .with_group("recommendations")
                .with_member(
                    FieldDef::new("post", FieldType::Reference)
                        .with_target(DocType::Post)
                        .with_options(FieldOptions {
                            filter: Some(ReferenceFilter::ExcludeSelf),
                            disable_new: true,
                            ..FieldOptions::default()
                        }),
                ),
            FieldDef::new("relatedTopics", FieldType::Array)
                .with_title("Sujets connexes")
                .with_description("Tags spécifiques pour le système de recommandation")
                .with_group("recommendations")
                .with_member(FieldDef::new("topic", FieldType::String))
                .with_options(FieldOptions {
                    layout: Some(Layout::Tags),
                    ..FieldOptions::default()
                }),
            FieldDef::new("recommendationSettings", FieldType::Object)
                .with_title("Paramètres de recommandation")
                .with_group("recommendations")
                .with_field(
                    FieldDef::new("priority", FieldType::String)
                        .with_title("Priorité des recommandations")
                        .with_options(FieldOptions {
                            list: vec![
                                ListOption::new("Manuel uniquement", "manual"),
                                ListOption::new("Automatique uniquement", "auto"),
                                ListOption::new("Manuel puis automatique", "mixed"),
                            ],
                            layout: Some(Layout::Radio),
                            ..FieldOptions::default()
                        })
                        .with_initial(InitialValue::Value(serde_json::json!("mixed"))),
                )
                .with_field(
                    FieldDef::new("maxRecommendations", FieldType::Number)
                        .with_title("Nombre maximum de recommandations")
                        .with_rule(Rule::Min(0))
                        .with_rule(Rule::Max(6))
                        .with_initial(InitialValue::Value(serde_json::json!(3))),
                ),
        ],
        orderings: vec![
            Ordering::by_field(
                "publishedAtDesc",
                "Date de publication, du plus récent",
                "publishedAt",
                SortDirection::Desc,
            ),
            Ordering::by_field("titleAsc", "Titre, A-Z", "title", SortDirection::Asc),
        ],
        select: vec![
            SelectEntry::new("title", "title"),
            SelectEntry::new("authorFirstName", "author.firstName"),
            SelectEntry::new("authorLastName", "author.lastName"),
            SelectEntry::new("date", "publishedAt"),
            SelectEntry::new("media", "coverImage"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_core::validate::NoLookup;
    use chrono::TimeZone;

    fn complete_post() -> Post {
        Post {
            id: Some(DocId::new("post-1")),
            title: Some("Les marchés de producteurs en Provence".to_string()),
            slug: Some(Slug::new("les-marches-de-producteurs-en-provence")),
            content: Some(RichContent::default()),
            excerpt: Some(
                "Tour d'horizon des marchés de producteurs provençaux, de Forcalquier à Apt."
                    .to_string(),
            ),
            cover_image: Some(ImageField::with_alt(
                "image-marche",
                "Étal de légumes sur un marché provençal",
            )),
            published_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()),
            author: Some(Reference::to("author-1")),
            categories: vec![Reference::to("category-1")],
            ..Post::default()
        }
    }

    fn jane_doe() -> Author {
        Author {
            id: Some(DocId::new("author-1")),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            ..Author::default()
        }
    }

    #[test]
    fn complete_post_validates() {
        let report = complete_post().validate(&NoLookup);
        assert!(report.is_valid(), "unexpected: {:?}", report.violations);
    }

    #[test]
    fn title_length_bounds_are_enforced() {
        let mut post = complete_post();
        post.title = Some("Trop court".to_string()); // exactly 10 chars: passes
        assert!(post.validate(&NoLookup).is_valid());

        post.title = Some("Court".to_string());
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "title" && matches!(v.error, FieldError::TooShort { .. })));

        post.title = Some("x".repeat(101));
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "title" && matches!(v.error, FieldError::TooLong { .. })));
    }

    #[test]
    fn cover_image_is_required_with_descriptive_alt() {
        let mut post = complete_post();
        post.cover_image = None;
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "coverImage" && v.error == FieldError::Missing));

        post.cover_image = Some(ImageField::with_alt("image-1", "trop court"));
        let report = post.validate(&NoLookup);
        assert!(report.violations.iter().any(|v| v.path == "coverImage.alt"
            && matches!(v.error, FieldError::TooShort { min: 10, .. })));
    }

    #[test]
    fn author_and_categories_are_required() {
        let mut post = complete_post();
        post.author = None;
        post.categories.clear();
        let report = post.validate(&NoLookup);
        let paths: Vec<&str> = report.violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"author"));
        assert!(paths.contains(&"categories"));
    }

    #[test]
    fn excerpt_bounds_apply_only_when_present() {
        let mut post = complete_post();
        post.excerpt = None;
        assert!(post.validate(&NoLookup).is_valid());

        post.excerpt = Some("Résumé trop court.".to_string());
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "excerpt" && matches!(v.error, FieldError::TooShort { .. })));
    }

    #[test]
    fn recommended_posts_reject_self_duplicates_and_overflow() {
        let mut post = complete_post();
        post.recommended_posts = vec![
            Reference::to("post-2"),
            Reference::to("post-1"), // self
            Reference::to("post-2"), // duplicate
        ];
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "recommendedPosts[1]" && v.error == FieldError::SelfReference));
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "recommendedPosts[2]"
                && matches!(v.error, FieldError::Duplicate { .. })));

        post.recommended_posts = (2..9).map(|i| Reference::to(format!("post-{i}"))).collect();
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "recommendedPosts"
                && matches!(v.error, FieldError::TooManyItems { max: 6, actual: 7 })));
    }

    #[test]
    fn canonical_url_is_format_checked() {
        let mut post = complete_post();
        post.canonical_url = Some("exemple.fr/article".to_string());
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "canonicalUrl" && matches!(v.error, FieldError::InvalidUrl { .. })));
    }

    #[test]
    fn social_image_needs_alt_like_any_image() {
        let mut post = complete_post();
        post.social_image = Some(ImageField {
            asset: Some("image-social".to_string()),
            ..ImageField::default()
        });
        let report = post.validate(&NoLookup);
        assert!(report
            .violations
            .iter()
            .any(|v| v.path == "socialImage.alt" && v.error == FieldError::MissingAltText));
    }

    #[test]
    fn derive_slug_normalizes_the_title() {
        let post = Post {
            title: Some("L'Été à Paris : guide 2024 !".to_string()),
            ..Post::default()
        };
        let slug = post.derive_slug().expect("slug");
        assert!(slug
            .current
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
    }

    #[test]
    fn preview_subtitle_composes_author_and_date() {
        let post = complete_post();
        let preview = post.preview(Some(&jane_doe()));
        assert_eq!(
            preview.subtitle.as_deref(),
            Some("par Jane Doe le 05/03/2024")
        );
    }

    #[test]
    fn preview_subtitle_omits_absent_parts() {
        let mut post = complete_post();
        let preview = post.preview(None);
        assert_eq!(preview.subtitle.as_deref(), Some("le 05/03/2024"));

        post.published_at = None;
        let preview = post.preview(Some(&jane_doe()));
        assert_eq!(preview.subtitle.as_deref(), Some("par Jane Doe"));

        let preview = post.preview(None);
        assert_eq!(preview.subtitle, None);
    }

    #[test]
    fn preview_requires_both_author_names() {
        let post = complete_post();
        let half_author = Author {
            first_name: Some("Jane".to_string()),
            ..Author::default()
        };
        let preview = post.preview(Some(&half_author));
        assert_eq!(preview.subtitle.as_deref(), Some("le 05/03/2024"));
    }

    #[test]
    fn schema_bounds_match_the_validator() {
        let schema = schema();
        let title = schema.field("title").expect("title");
        assert_eq!(title.min(), Some(TITLE_MIN as i64));
        assert_eq!(title.max(), Some(TITLE_MAX as i64));

        let settings = schema
            .field("recommendationSettings")
            .expect("recommendationSettings");
        let max = settings
            .fields
            .iter()
            .find(|f| f.name == "maxRecommendations")
            .expect("maxRecommendations");
        assert_eq!(max.min(), Some(0));
        assert_eq!(max.max(), Some(6));
    }

    #[test]
    fn schema_orderings_cover_date_and_title() {
        let schema = schema();
        let names: Vec<&str> = schema.orderings.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["publishedAtDesc", "titleAsc"]);
        assert_eq!(schema.orderings[0].by[0].direction, SortDirection::Desc);
    }

    #[test]
    fn recommended_posts_member_excludes_self_in_picker() {
        let schema = schema();
        let recommended = schema.field("recommendedPosts").expect("recommendedPosts");
        let member = &recommended.of[0];
        let options = member.options.as_ref().expect("options");
        assert_eq!(options.filter, Some(ReferenceFilter::ExcludeSelf));
        assert!(options.disable_new);
    }
}
