//! Schema-ordered document traversal for cmskit.
//!
//! Walks a document against its collection's [`SchemaMap`] and reports every
//! field in schema declaration order, whatever order the document's keys are
//! in. Two modes:
//!
//! - [`flatten_document_values`]: async; each field is handed to the
//!   [`FieldResolver`] registered for its type in [`FieldResolvers`], and the
//!   results are concatenated into a list of [`FlattenedFieldValue`]s.
//! - [`traverse_document`]: sync; a callback sees every field (containers
//!   first, then their children) and can stop the walk with
//!   [`ControlFlow::Break`](std::ops::ControlFlow::Break).
//!   [`flatten_document_values_v2`] collects every visit.
//!
//! [`SchemaMap`]: cmskit_model::SchemaMap

mod error;
mod flatten;
mod level;
mod lookup;
mod path;
pub mod resolvers;
mod traverse;

pub use error::{TraverseError, TraverseResult};
pub use flatten::{FlattenContext, flatten_document_values};
pub use lookup::{DocumentLookup, InMemoryDocuments};
pub use path::{FlattenedFieldValue, IndexPathSegment, PathName, SchemaPathSegment};
pub use resolvers::{FieldResolver, FieldResolvers, ResolveArgs};
pub use traverse::{
    DEFAULT_EXCLUDED_FIELDS, TraverseArgs, Visit, flatten_document_values_v2, traverse_document,
};
