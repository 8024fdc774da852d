//! Collection schema model for cmskit.
//!
//! Defines the types every cmskit subsystem reads a collection's shape through:
//! - [`Field`] / [`FieldType`]: one declared field and its fixed type tag
//! - [`Label`] / [`Localizer`]: human-readable labels and the localization
//!   capability used to resolve them
//! - [`Config`]: all collections and globals of a site
//! - [`SchemaMap`]: ordered mapping from dotted schema path to field, the
//!   authoritative source of field order
//! - [`Document`]: a stored document (id, collection, JSON payload)

mod config;
mod document;
mod error;
mod field;
mod label;
mod schema;

pub use config::{CollectionAdmin, CollectionConfig, Config, GlobalConfig, find_field_by_path};
pub use document::Document;
pub use error::{ModelError, ModelResult};
pub use field::{Field, FieldType, RelationTo, Tab};
pub use label::{I18n, Label, LabelFn, Localizer, resolve_field_label};
pub use schema::{SchemaLookup, SchemaMap};
