//! # billet-core
//!
//! Field primitives, schema surface, and validation plumbing for the
//! billet content model.
//!
//! This crate defines the foundational types used across all other
//! billet crates:
//! - [`FieldDef`] and friends — the declarative schema surface consumed
//!   by the hosting studio
//! - [`Slug`] and the two slug derivation policies ([`slug`])
//! - [`ImageField`] — images with their editorial companion fields
//! - [`Reference`], [`DocId`], [`DocType`] — cross-document identity
//! - [`Preview`] — the `{title, subtitle, media}` list projection
//! - Error hierarchy ([`BilletError`], [`FieldError`], [`Violation`])
//! - Per-field checks and the uniqueness seam ([`validate`])

pub mod error;
pub mod field;
pub mod image;
pub mod preview;
pub mod reference;
pub mod slug;
pub mod validate;

pub use error::{BilletError, FieldError, Result, Violation};
pub use field::{
    ArraySchema, BlockDef, DocumentSchema, FieldDef, FieldGroup, FieldOptions, FieldType,
    InitialValue, Layout, ListOption, OrderBy, Ordering, Rule, SchemaType, SelectEntry,
    SlugStrategy, SortDirection,
};
pub use image::{Hotspot, ImageField, ImageMetadataKind};
pub use preview::Preview;
pub use reference::{DocId, DocType, Reference, ReferenceFilter};
pub use slug::Slug;
pub use validate::{NoLookup, SlugLookup, ValidationReport};
