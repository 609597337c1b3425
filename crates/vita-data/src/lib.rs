//! Portfolio data model and document loading.
//!
//! Provides [`SiteData`], the flat document a portfolio page is rendered
//! from, along with the union types for publication records and timeline
//! entries. The document is read once and never mutated by consumers;
//! renderers only borrow from it.
//!
//! # Schema tolerance
//!
//! Every field is optional. Unknown fields are ignored, missing sequences
//! default to empty, and both the string and object shapes of publication
//! and timeline records are accepted.

mod document;
mod entry;
mod publication;

pub use document::{DataError, FeaturedCard, ProfileLink, SiteData};
pub use entry::{TimedEntry, TimelineEntry};
pub use publication::{Publication, StructuredPublication};
