//! The raw field-definition input of the mapping engine.
//!
//! These types are supplied by the field-discovery collaborator and describe, for one entity
//! type, which predicates and formats its field columns use and which RDF classes its bundles map
//! to. The engine treats them as read-only and validates them when building a mapping table.

use serde::Deserialize;

/// The raw field definitions and bundle configuration of a single entity type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityTypeDefinition {
    /// The entity type identifier.
    pub entity_type: String,
    /// The field that holds the bundle of an entity (e.g., `type`). If set, the field is mapped
    /// onto `rdf:type`.
    #[serde(default)]
    pub bundle_key: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub bundles: Vec<BundleDefinition>,
}

impl EntityTypeDefinition {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle_key: None,
            fields: Vec::new(),
            bundles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bundle_key(mut self, bundle_key: impl Into<String>) -> Self {
        self.bundle_key = Some(bundle_key.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_bundle(mut self, bundle: BundleDefinition) -> Self {
        self.bundles.push(bundle);
        self
    }
}

/// The definition of a field, either for the whole entity type or for a single bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDefinition {
    /// `None` if the field is shared by all bundles of the entity type.
    #[serde(default)]
    pub bundle: Option<String>,
    pub field: String,
    /// The column used when no column is requested explicitly.
    pub main_property: String,
    pub columns: Vec<ColumnDefinition>,
}

impl FieldDefinition {
    /// Creates a field that is shared by all bundles.
    pub fn shared(field: impl Into<String>, main_property: impl Into<String>) -> Self {
        Self {
            bundle: None,
            field: field.into(),
            main_property: main_property.into(),
            columns: Vec::new(),
        }
    }

    /// Creates a field that is defined for `bundle` only.
    pub fn for_bundle(
        bundle: impl Into<String>,
        field: impl Into<String>,
        main_property: impl Into<String>,
    ) -> Self {
        Self {
            bundle: Some(bundle.into()),
            ..Self::shared(field, main_property)
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
}

/// A declared column of a field.
///
/// A column without predicates is declared but not mapped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct ColumnDefinition {
    pub column: String,
    #[serde(default)]
    pub predicates: Vec<String>,
    /// The format tag (`resource`, `t_literal` or `literal`). Required for mapped columns.
    #[serde(default)]
    pub format: Option<String>,
    /// The primitive data type name. Defaults to `string`.
    #[serde(default)]
    pub data_type: Option<String>,
}

impl ColumnDefinition {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            predicates: Vec::new(),
            format: None,
            data_type: None,
        }
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicates.push(predicate.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }
}

/// Associates a bundle with the RDF class that identifies it in the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BundleDefinition {
    pub bundle: String,
    pub class_uri: String,
    /// The URI of the bundle as an addressable resource. Defaults to the class URI.
    #[serde(default)]
    pub resource_uri: Option<String>,
}

impl BundleDefinition {
    pub fn new(bundle: impl Into<String>, class_uri: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            class_uri: class_uri.into(),
            resource_uri: None,
        }
    }

    #[must_use]
    pub fn with_resource_uri(mut self, resource_uri: impl Into<String>) -> Self {
        self.resource_uri = Some(resource_uri.into());
        self
    }
}
