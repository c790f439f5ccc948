use crate::builder::EntityTypeMappingBuilder;
use crate::bundle::BundleMapping;
use crate::field::FieldMapping;
use rdf_entity_model::{EntityTypeDefinition, MappingResult};
use std::collections::BTreeMap;

/// The immutable mapping table of an entity type.
///
/// Associates each mapped (field, column) pair with its predicates, format and data type, and each
/// bundle with its URIs. Once built, a table is never mutated. A change in the field definitions
/// requires building a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeMapping {
    entity_type: String,
    /// The main property of every declared field, including fields without mapped columns.
    main_properties: BTreeMap<String, String>,
    fields: BTreeMap<(String, String), FieldMapping>,
    bundles: BundleMapping,
}

impl EntityTypeMapping {
    /// Builds the mapping table of an entity type from its raw field definitions.
    ///
    /// Building is deterministic. Two definitions that only differ in the order of their field
    /// definitions produce equal tables.
    ///
    /// # Errors
    ///
    /// Returns [InvalidMetadata](rdf_entity_model::MappingError::InvalidMetadata) if the
    /// definitions are malformed, and
    /// [UnsupportedDataType](rdf_entity_model::MappingError::UnsupportedDataType) if a column
    /// names an unknown data type.
    pub fn try_new(definition: &EntityTypeDefinition) -> MappingResult<Self> {
        EntityTypeMappingBuilder::build(definition)
    }

    pub(crate) fn new(
        entity_type: String,
        main_properties: BTreeMap<String, String>,
        fields: BTreeMap<(String, String), FieldMapping>,
        bundles: BundleMapping,
    ) -> Self {
        Self {
            entity_type,
            main_properties,
            fields,
            bundles,
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Returns the mapping of the (field, column) pair, if the column is mapped.
    pub fn field_mapping(&self, field: &str, column: &str) -> Option<&FieldMapping> {
        self.fields.get(&(field.to_owned(), column.to_owned()))
    }

    /// Like [Self::field_mapping], but also returns the column as stored in the table.
    pub(crate) fn field_entry(&self, field: &str, column: &str) -> Option<(&str, &FieldMapping)> {
        self.fields
            .get_key_value(&(field.to_owned(), column.to_owned()))
            .map(|((_, column), mapping)| (column.as_str(), mapping))
    }

    /// Returns the main property of `field`, if the field is declared.
    pub fn main_property(&self, field: &str) -> Option<&str> {
        self.main_properties.get(field).map(String::as_str)
    }

    /// Iterates over the mapped (field, column) pairs in lexical order.
    pub fn fields(&self) -> impl Iterator<Item = ((&str, &str), &FieldMapping)> {
        self.fields
            .iter()
            .map(|((field, column), mapping)| ((field.as_str(), column.as_str()), mapping))
    }

    pub fn bundles(&self) -> &BundleMapping {
        &self.bundles
    }

    /// The number of mapped (field, column) pairs.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
