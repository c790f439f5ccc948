//! The entry point of the mapping engine.
//!
//! Usage example:
//! ```
//! use rdf_entity::mapping::MemFieldDefinitions;
//! use rdf_entity::model::*;
//! use rdf_entity::RdfFieldHandler;
//! use std::sync::Arc;
//!
//! let definitions = MemFieldDefinitions::new();
//! definitions.insert(
//!     EntityTypeDefinition::new("node").with_field(
//!         FieldDefinition::shared("title", "value").with_column(
//!             ColumnDefinition::new("value")
//!                 .with_predicate("http://purl.org/dc/terms/title")
//!                 .with_format("t_literal"),
//!         ),
//!     ),
//! );
//! let handler = RdfFieldHandler::new(Arc::new(definitions));
//!
//! let term = handler.outbound_value("node", "title", &"Hello".into(), Some("en"), None, None)?;
//! assert_eq!(term.to_string(), "\"Hello\"@en");
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::config::RdfEntityConfig;
use rdf_entity_encoding::{EncodingTarget, ValueCodec};
use rdf_entity_mapping::{
    BundleMatch, EntityTypeMapping, FieldDefinitionSourceRef, MappingCache, ResolvedField,
};
use rdf_entity_model::{
    DataType, FieldFormat, FieldValue, MappingResult, NamedNode, Term, TermRef,
    UnmappedBundleError, UnmappedFieldError,
};
use std::sync::Arc;

/// Resolves the RDF predicates of entity fields and converts field values to and from RDF terms.
///
/// The mapping tables are built lazily from the field definitions of the
/// [FieldDefinitionSource](rdf_entity_mapping::FieldDefinitionSource) and cached. After the field
/// definitions of an entity type change, call [Self::invalidate] or [Self::rebuild].
///
/// Cloning a handler is cheap, and clones share the cache.
#[derive(Debug, Clone)]
pub struct RdfFieldHandler {
    cache: Arc<MappingCache>,
    codec: ValueCodec,
}

impl RdfFieldHandler {
    /// Creates a new [RdfFieldHandler] with the default configuration.
    pub fn new(source: FieldDefinitionSourceRef) -> Self {
        Self::new_with_config(source, RdfEntityConfig::default())
    }

    pub fn new_with_config(source: FieldDefinitionSourceRef, config: RdfEntityConfig) -> Self {
        let codec = ValueCodec::new(config.registry).with_neutral_langcode(config.neutral_langcode);
        Self {
            cache: Arc::new(MappingCache::new(source)),
            codec,
        }
    }

    pub fn cache(&self) -> &MappingCache {
        &self.cache
    }

    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// Returns the mapping table of `entity_type`, building it on first use.
    pub fn inbound_map(&self, entity_type: &str) -> MappingResult<Arc<EntityTypeMapping>> {
        self.cache.get(entity_type)
    }

    /// Returns the predicates of a field column.
    ///
    /// If `column` is `None`, the main property of the field is used. If `bundle` overrides the
    /// mapping of the field, the predicates of the override are returned.
    ///
    /// # Errors
    ///
    /// Returns [MappingError::UnmappedField](crate::MappingError::UnmappedField) if the field
    /// column has no predicates.
    pub fn field_predicates(
        &self,
        entity_type: &str,
        field: &str,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> MappingResult<Vec<NamedNode>> {
        let table = self.inbound_map(entity_type)?;
        Ok(table.field_predicates(field, column, bundle)?.to_vec())
    }

    /// Whether a field column has predicates. Returns false instead of failing.
    pub fn has_field_predicate(
        &self,
        entity_type: &str,
        bundle: Option<&str>,
        field: &str,
        column: Option<&str>,
    ) -> bool {
        self.inbound_map(entity_type)
            .is_ok_and(|table| table.has_field_predicate(bundle, field, column))
    }

    /// Returns the formats of a field column.
    ///
    /// With a bundle, this is the format that applies to the bundle. Without a bundle, these are
    /// the distinct formats of the field and all bundle overrides.
    pub fn field_formats(
        &self,
        entity_type: &str,
        field: &str,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> MappingResult<Vec<FieldFormat>> {
        let table = self.inbound_map(entity_type)?;
        Ok(table.field_formats(field, column, bundle)?)
    }

    /// Returns the main property of `field`.
    pub fn field_main_property(&self, entity_type: &str, field: &str) -> MappingResult<String> {
        let table = self.inbound_map(entity_type)?;
        let main_property = table.main_property(field).ok_or_else(|| UnmappedFieldError {
            entity_type: entity_type.to_owned(),
            field: field.to_owned(),
            column: None,
            bundle: None,
        })?;
        Ok(main_property.to_owned())
    }

    /// Returns all predicates used by `entity_type`, without duplicates.
    pub fn property_list(&self, entity_type: &str) -> MappingResult<Vec<NamedNode>> {
        Ok(self.inbound_map(entity_type)?.property_list())
    }

    /// Converts bundle ids into their class URIs, or into their resource URIs if
    /// `to_resource_uris` is set.
    ///
    /// # Errors
    ///
    /// Returns [MappingError::UnmappedBundle](crate::MappingError::UnmappedBundle) naming every
    /// bundle without a mapping. No partial result is returned.
    pub fn bundles_to_uris<S: AsRef<str>>(
        &self,
        entity_type: &str,
        bundles: &[S],
        to_resource_uris: bool,
    ) -> MappingResult<Vec<NamedNode>> {
        let table = self.inbound_map(entity_type)?;
        Ok(table.bundles().bundles_to_uris(bundles, to_resource_uris)?)
    }

    /// Converts a single bundle id into its class URI or its resource URI.
    pub fn outbound_bundle_value(
        &self,
        entity_type: &str,
        bundle: &str,
        to_resource_uri: bool,
    ) -> MappingResult<NamedNode> {
        let table = self.inbound_map(entity_type)?;
        let uri = table
            .bundles()
            .outbound_uri(bundle, to_resource_uri)
            .ok_or_else(|| UnmappedBundleError::outbound(entity_type, vec![bundle.to_owned()]))?;
        Ok(uri.clone())
    }

    /// Returns every bundle whose class URI is `bundle_uri`.
    ///
    /// Several bundles may share a URI. Use [BundleMatch::single] if exactly one bundle is
    /// expected.
    pub fn inbound_bundle_value(
        &self,
        entity_type: &str,
        bundle_uri: &str,
    ) -> MappingResult<BundleMatch> {
        let table = self.inbound_map(entity_type)?;
        Ok(table.bundles().inbound_bundles(bundle_uri)?)
    }

    /// Converts a native field value into the RDF term that is written to the store.
    ///
    /// The format and the data type are resolved for the bundle, as the same field may be
    /// represented differently in different bundles.
    pub fn outbound_value(
        &self,
        entity_type: &str,
        field: &str,
        value: &FieldValue,
        langcode: Option<&str>,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> MappingResult<Term> {
        let table = self.inbound_map(entity_type)?;
        let resolved = table.resolve(field, column, bundle)?;
        self.codec
            .encode(encoding_target(entity_type, field, resolved), value, langcode)
    }

    /// Converts an RDF term read from the store into a native field value.
    pub fn inbound_value(
        &self,
        entity_type: &str,
        field: &str,
        term: TermRef<'_>,
        langcode: Option<&str>,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> MappingResult<FieldValue> {
        let table = self.inbound_map(entity_type)?;
        let resolved = table.resolve(field, column, bundle)?;
        self.codec
            .decode(encoding_target(entity_type, field, resolved), term, langcode)
    }

    /// Returns the data types with a registered converter.
    pub fn supported_data_types(&self) -> Vec<DataType> {
        self.codec.registry().supported_data_types()
    }

    /// Drops the cached mapping table of `entity_type`. Returns true if a table was cached.
    pub fn invalidate(&self, entity_type: &str) -> bool {
        self.cache.invalidate(entity_type)
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Rebuilds the mapping table of `entity_type` and replaces the cached one atomically.
    pub fn rebuild(&self, entity_type: &str) -> MappingResult<Arc<EntityTypeMapping>> {
        self.cache.rebuild(entity_type)
    }
}

fn encoding_target<'a>(
    entity_type: &'a str,
    field: &'a str,
    resolved: ResolvedField<'_>,
) -> EncodingTarget<'a> {
    EncodingTarget {
        entity_type,
        field,
        format: resolved.mapping.format(),
        data_type: resolved.mapping.data_type(),
    }
}
