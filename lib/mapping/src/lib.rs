//! Mapping tables that associate the fields and bundles of an entity type with RDF predicates
//! and classes.
//!
//! A [EntityTypeMapping] is built once per entity type from the raw field definitions of a
//! [FieldDefinitionSource] and is immutable afterward. The [MappingCache] keeps the built tables
//! and allows replacing them atomically once the field definitions change.

mod builder;
mod bundle;
mod cache;
mod field;
mod properties;
mod resolver;
mod source;
mod table;

pub use bundle::{BundleMapping, BundleMatch, BundleUris};
pub use cache::MappingCache;
pub use field::{ColumnMapping, FieldMapping};
pub use resolver::ResolvedField;
pub use source::{FieldDefinitionSource, FieldDefinitionSourceRef, MemFieldDefinitions};
pub use table::EntityTypeMapping;

/// The column that holds the bundle of an entity when the bundle key is mapped onto `rdf:type`.
pub const BUNDLE_KEY_COLUMN: &str = "target_id";
