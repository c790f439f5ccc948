//! Conversion between native field values and their RDF representation.
//!
//! The [ValueCodec] dispatches on the [FieldFormat](rdf_entity_model::FieldFormat) of a field and
//! uses the [DataTypeConverter]s of a [DataTypeRegistry] for plain literals.

mod codec;
mod converter;
mod registry;

pub use codec::{EncodingTarget, ValueCodec};
pub use converter::{ConversionError, DataTypeConverter, FromLexical, ToLexical};
pub use registry::{DataTypeRegistry, DataTypeRegistryBuilder, DataTypeRegistryRef};
