//! # billet-schema
//!
//! The document types of the billet content model — [`Author`],
//! [`Category`], [`Post`] — together with:
//! - [`Document`] — the serde-tagged envelope over the three types
//! - [`DocumentSet`] — an in-memory corpus implementing the
//!   slug-uniqueness lookup and whole-set validation
//! - [`registry`] — the declarative schema surface handed to the
//!   hosting studio

pub mod author;
pub mod category;
pub mod post;
pub mod recommendation;

use serde::{Deserialize, Serialize};
use tracing::debug;

use billet_core::field::SchemaType;
use billet_core::preview::Preview;
use billet_core::reference::{DocId, DocType};
use billet_core::validate::{SlugLookup, ValidationReport};
use billet_core::Slug;
use billet_content::rich_content_schema;

pub use author::{Author, SocialLinks};
pub use category::Category;
pub use post::Post;
pub use recommendation::{
    RecommendationPriority, RecommendationSettings, DEFAULT_MAX_RECOMMENDATIONS,
    MAX_RECOMMENDATIONS,
};

/// Any document of the content model, tagged by `_type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum Document {
    Author(Author),
    Category(Category),
    Post(Post),
}

impl Document {
    #[must_use]
    pub fn doc_type(&self) -> DocType {
        match self {
            Document::Author(_) => DocType::Author,
            Document::Category(_) => DocType::Category,
            Document::Post(_) => DocType::Post,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&DocId> {
        match self {
            Document::Author(author) => author.id.as_ref(),
            Document::Category(category) => category.id.as_ref(),
            Document::Post(post) => post.id.as_ref(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> Option<&Slug> {
        match self {
            Document::Author(author) => author.slug.as_ref(),
            Document::Category(category) => category.slug.as_ref(),
            Document::Post(post) => post.slug.as_ref(),
        }
    }

    /// Validate against the given corpus seam.
    #[must_use]
    pub fn validate(&self, lookup: &dyn SlugLookup) -> ValidationReport {
        match self {
            Document::Author(author) => author.validate(lookup),
            Document::Category(category) => category.validate(lookup),
            Document::Post(post) => post.validate(lookup),
        }
    }
}

/// The complete declarative schema surface: the three document types
/// plus the rich content array type.
#[must_use]
pub fn registry() -> Vec<SchemaType> {
    vec![
        SchemaType::Document(author::schema()),
        SchemaType::Document(category::schema()),
        SchemaType::Document(post::schema()),
        SchemaType::Array(rich_content_schema()),
    ]
}

/// Look up one registry entry by its type name.
#[must_use]
pub fn schema_for(name: &str) -> Option<SchemaType> {
    registry().into_iter().find(|entry| entry.name() == name)
}

/// An in-memory corpus of documents.
///
/// Stands in for the hosting platform's document store when validating
/// a batch of files: slug uniqueness is checked across the set, and a
/// post's author is resolved from the set for preview composition.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    docs: Vec<Document>,
}

impl DocumentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doc: Document) {
        self.docs.push(doc);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    /// Resolve an author by id.
    #[must_use]
    pub fn author(&self, id: &DocId) -> Option<&Author> {
        self.docs.iter().find_map(|doc| match doc {
            Document::Author(author) if author.id.as_ref() == Some(id) => Some(author),
            _ => None,
        })
    }

    /// Validate every document against the set itself.
    #[must_use]
    pub fn validate_all(&self) -> Vec<ValidationReport> {
        let reports: Vec<ValidationReport> =
            self.docs.iter().map(|doc| doc.validate(self)).collect();
        let violations: usize = reports.iter().map(|r| r.violations.len()).sum();
        debug!(
            documents = self.docs.len(),
            violations, "validated document set"
        );
        reports
    }

    /// Preview projection of every document, resolving post authors
    /// within the set.
    #[must_use]
    pub fn previews(&self) -> Vec<Preview> {
        self.docs
            .iter()
            .map(|doc| match doc {
                Document::Author(author) => author.preview(),
                Document::Category(category) => category.preview(),
                Document::Post(post) => {
                    let author = post
                        .author
                        .as_ref()
                        .and_then(|reference| self.author(&reference.id));
                    post.preview(author)
                }
            })
            .collect()
    }
}

impl FromIterator<Document> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl SlugLookup for DocumentSet {
    fn slug_taken(&self, doc_type: DocType, slug: &str, excluding: Option<&DocId>) -> bool {
        // Only identified documents occupy a slug; a draft without an
        // id cannot be told apart from the document being validated.
        self.docs.iter().any(|doc| {
            doc.doc_type() == doc_type
                && doc.slug().map(Slug::as_str) == Some(slug)
                && doc.id().is_some()
                && doc.id() != excluding
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_core::error::FieldError;
    use billet_core::reference::Reference;
    use billet_core::ImageField;
    use chrono::{TimeZone, Utc};

    fn author(id: &str, slug: &str) -> Document {
        Document::Author(Author {
            id: Some(DocId::new(id)),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            slug: Some(Slug::new(slug)),
            ..Author::default()
        })
    }

    fn post(id: &str, slug: &str) -> Document {
        Document::Post(Post {
            id: Some(DocId::new(id)),
            title: Some("Les marchés de producteurs en Provence".to_string()),
            slug: Some(Slug::new(slug)),
            excerpt: Some(
                "Tour d'horizon des marchés de producteurs provençaux, de Forcalquier à Apt."
                    .to_string(),
            ),
            cover_image: Some(ImageField::with_alt(
                "image-1",
                "Étal de légumes sur un marché provençal",
            )),
            author: Some(Reference::to("author-1")),
            categories: vec![Reference::to("category-1")],
            ..Post::default()
        })
    }

    #[test]
    fn registry_names_every_type_once() {
        let names: Vec<String> = registry()
            .iter()
            .map(|entry| entry.name().to_string())
            .collect();
        assert_eq!(names, ["author", "category", "post", "bContent"]);
    }

    #[test]
    fn schema_for_finds_documents_and_arrays() {
        assert!(schema_for("post").is_some());
        assert!(schema_for("bContent").is_some());
        assert!(schema_for("page").is_none());
    }

    #[test]
    fn document_round_trips_through_type_tag() {
        let doc = author("author-1", "jane-doe");
        let json = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(json["_type"], "author");
        assert_eq!(json["_id"], "author-1");
        let back: Document = serde_json::from_value(json).expect("parse");
        assert_eq!(back, doc);
    }

    #[test]
    fn slug_collision_within_a_type_is_reported() {
        let set: DocumentSet = [post("post-1", "meme-slug"), post("post-2", "meme-slug")]
            .into_iter()
            .collect();
        let reports = set.validate_all();
        for report in &reports {
            assert!(report
                .violations
                .iter()
                .any(|v| v.path == "slug" && matches!(v.error, FieldError::SlugTaken { .. })));
        }
    }

    #[test]
    fn same_slug_across_types_is_fine() {
        let set: DocumentSet = [post("post-1", "jane-doe"), author("author-1", "jane-doe")]
            .into_iter()
            .collect();
        let reports = set.validate_all();
        assert!(reports.iter().all(ValidationReport::is_valid));
    }

    #[test]
    fn a_document_does_not_collide_with_itself() {
        let set: DocumentSet = [post("post-1", "mon-slug")].into_iter().collect();
        assert!(!set.slug_taken(
            DocType::Post,
            "mon-slug",
            Some(&DocId::new("post-1"))
        ));
        assert!(set.slug_taken(DocType::Post, "mon-slug", Some(&DocId::new("post-9"))));
        assert!(set.slug_taken(DocType::Post, "mon-slug", None));
    }

    #[test]
    fn previews_resolve_post_authors_from_the_set() {
        let mut post_doc = post("post-1", "mon-slug");
        if let Document::Post(post) = &mut post_doc {
            post.published_at = Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
        }
        let set: DocumentSet = [author("author-1", "jane-doe"), post_doc]
            .into_iter()
            .collect();
        let previews = set.previews();
        assert_eq!(previews[0].title, "Jane Doe");
        assert_eq!(
            previews[1].subtitle.as_deref(),
            Some("par Jane Doe le 05/03/2024")
        );
    }
}
