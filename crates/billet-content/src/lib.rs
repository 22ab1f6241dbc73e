//! # billet-content
//!
//! Rich content block model for billet: an ordered sequence of typed
//! nodes (text blocks, images, callouts) with inline decorators and
//! annotations, plus the declarative schema of the block type for the
//! hosting studio.

pub mod block;
pub mod node;
pub mod schema;

pub use block::{Annotation, BlockStyle, Decorator, ListStyle, MarkDef, Span, TextBlock};
pub use node::{Callout, CalloutKind, ContentNode, RichContent};
pub use schema::{rich_content_schema, RICH_CONTENT_TYPE};
