use itertools::Itertools;
use rdf_entity_model::{DataType, FieldFormat, NamedNode};
use std::collections::BTreeMap;

/// How a single field column is represented in RDF, for one bundle or for the whole entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    predicates: Vec<NamedNode>,
    format: FieldFormat,
    data_type: DataType,
}

impl ColumnMapping {
    /// Creates a new [ColumnMapping].
    ///
    /// The predicates must not be empty. This is checked when building a mapping table.
    pub fn new(predicates: Vec<NamedNode>, format: FieldFormat, data_type: DataType) -> Self {
        Self {
            predicates,
            format,
            data_type,
        }
    }

    /// The ordered predicates. Never empty.
    pub fn predicates(&self) -> &[NamedNode] {
        &self.predicates
    }

    pub fn format(&self) -> FieldFormat {
        self.format
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

/// The mapping of a (field, column) pair of an entity type.
///
/// Holds the field-level mapping and the per-bundle overrides. If the field is not shared by all
/// bundles, the field-level mapping is derived from the bundle mappings and is only used when no
/// bundle is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    main_property: String,
    default: ColumnMapping,
    shared: bool,
    bundles: BTreeMap<String, ColumnMapping>,
}

impl FieldMapping {
    pub(crate) fn new(
        main_property: String,
        default: ColumnMapping,
        shared: bool,
        bundles: BTreeMap<String, ColumnMapping>,
    ) -> Self {
        Self {
            main_property,
            default,
            shared,
            bundles,
        }
    }

    /// The field-level predicates.
    pub fn predicates(&self) -> &[NamedNode] {
        self.default.predicates()
    }

    /// The field-level format.
    pub fn format(&self) -> FieldFormat {
        self.default.format()
    }

    /// The field-level data type.
    pub fn data_type(&self) -> DataType {
        self.default.data_type()
    }

    /// The column that is used if no column is requested.
    pub fn main_property(&self) -> &str {
        &self.main_property
    }

    /// Whether the field is declared for the entity type as a whole.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// The field-level mapping.
    pub fn default_mapping(&self) -> &ColumnMapping {
        &self.default
    }

    /// The mapping of `bundle` if the bundle overrides the field-level mapping.
    pub fn bundle_override(&self, bundle: &str) -> Option<&ColumnMapping> {
        self.bundles.get(bundle)
    }

    /// Iterates over the per-bundle overrides, ordered by bundle id.
    pub fn bundle_overrides(&self) -> impl Iterator<Item = (&str, &ColumnMapping)> {
        self.bundles
            .iter()
            .map(|(bundle, mapping)| (bundle.as_str(), mapping))
    }

    /// Returns the mapping that applies to `bundle`.
    ///
    /// A bundle override takes precedence over the field-level mapping. Fields that are not shared
    /// only apply to the bundles that declare them. Without a bundle, the field-level mapping is
    /// returned.
    pub fn mapping_for(&self, bundle: Option<&str>) -> Option<&ColumnMapping> {
        match bundle {
            None => Some(&self.default),
            Some(bundle) => match self.bundles.get(bundle) {
                Some(mapping) => Some(mapping),
                None if self.shared => Some(&self.default),
                None => None,
            },
        }
    }

    /// The distinct formats of the field-level mapping and all bundle overrides.
    pub fn formats(&self) -> Vec<FieldFormat> {
        std::iter::once(&self.default)
            .chain(self.bundles.values())
            .map(ColumnMapping::format)
            .unique()
            .collect()
    }
}
