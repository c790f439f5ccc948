use crate::bundle::BundleMapping;
use crate::field::{ColumnMapping, FieldMapping};
use crate::table::EntityTypeMapping;
use crate::BUNDLE_KEY_COLUMN;
use itertools::Itertools;
use rdf_entity_model::vocab::rdf;
use rdf_entity_model::{
    ColumnDefinition, DataType, EntityTypeDefinition, FieldDefinition, FieldFormat,
    InvalidMetadataError, MappingResult, NamedNode,
};
use std::collections::{BTreeMap, BTreeSet};

/// The declarations of a single (field, column) pair.
#[derive(Default)]
struct ColumnDeclarations {
    shared: Option<ColumnMapping>,
    bundles: BTreeMap<String, ColumnMapping>,
}

/// Collects the validated field definitions of an entity type and assembles the
/// [EntityTypeMapping].
///
/// The result only depends on the content of the definitions, not on their order.
pub(crate) struct EntityTypeMappingBuilder<'def> {
    entity_type: &'def str,
    main_properties: BTreeMap<String, String>,
    columns: BTreeMap<(String, String), ColumnDeclarations>,
}

impl<'def> EntityTypeMappingBuilder<'def> {
    pub(crate) fn new(entity_type: &'def str) -> Self {
        Self {
            entity_type,
            main_properties: BTreeMap::new(),
            columns: BTreeMap::new(),
        }
    }

    pub(crate) fn build(definition: &'def EntityTypeDefinition) -> MappingResult<EntityTypeMapping> {
        let mut builder = Self::new(&definition.entity_type);

        // Visiting the definitions in a fixed order keeps error reporting deterministic.
        let fields = definition
            .fields
            .iter()
            .sorted_by(|lhs, rhs| sort_key(lhs).cmp(&sort_key(rhs)));
        for field in fields {
            builder.add_field(field)?;
        }
        if let Some(bundle_key) = &definition.bundle_key {
            builder.add_bundle_key(bundle_key);
        }

        let bundles = BundleMapping::try_new(&definition.entity_type, &definition.bundles)?;
        Ok(builder.finish(bundles))
    }

    fn invalid(&self, reason: String) -> InvalidMetadataError {
        InvalidMetadataError::new(self.entity_type, reason)
    }

    fn add_field(&mut self, definition: &FieldDefinition) -> MappingResult<()> {
        let field = &definition.field;

        let mut declared = BTreeSet::new();
        for column in &definition.columns {
            if !declared.insert(column.column.as_str()) {
                return Err(self
                    .invalid(format!(
                        "column '{}' of field '{field}' is declared twice",
                        column.column
                    ))
                    .into());
            }
        }
        if !declared.contains(definition.main_property.as_str()) {
            return Err(self
                .invalid(format!(
                    "main property '{}' is not a column of field '{field}'",
                    definition.main_property
                ))
                .into());
        }

        match self.main_properties.get(field) {
            Some(existing) if *existing != definition.main_property => {
                return Err(self
                    .invalid(format!(
                        "field '{field}' declares the main properties '{existing}' and '{}'",
                        definition.main_property
                    ))
                    .into());
            }
            Some(_) => {}
            None => {
                self.main_properties
                    .insert(field.clone(), definition.main_property.clone());
            }
        }

        for column in &definition.columns {
            let Some(mapping) = self.column_mapping(field, column)? else {
                continue;
            };
            self.declare(field, &column.column, definition.bundle.as_deref(), mapping)?;
        }
        Ok(())
    }

    /// Validates a declared column. Returns `None` for columns without predicates.
    fn column_mapping(
        &self,
        field: &str,
        column: &ColumnDefinition,
    ) -> MappingResult<Option<ColumnMapping>> {
        if column.predicates.is_empty() {
            return Ok(None);
        }

        let format = column.format.as_deref().ok_or_else(|| {
            self.invalid(format!(
                "column '{}' of field '{field}' has predicates but no format",
                column.column
            ))
        })?;
        let format = format
            .parse::<FieldFormat>()
            .map_err(|error| self.invalid(format!("{error} in field '{field}'")))?;
        let data_type = match &column.data_type {
            Some(data_type) => data_type.parse::<DataType>()?,
            None => DataType::default(),
        };
        let predicates = column
            .predicates
            .iter()
            .map(|predicate| {
                NamedNode::new(predicate.as_str()).map_err(|error| {
                    self.invalid(format!(
                        "invalid predicate '{predicate}' in field '{field}': {error}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ColumnMapping::new(predicates, format, data_type)))
    }

    fn declare(
        &mut self,
        field: &str,
        column: &str,
        bundle: Option<&str>,
        mapping: ColumnMapping,
    ) -> Result<(), InvalidMetadataError> {
        let entity_type = self.entity_type;
        let duplicate = || {
            InvalidMetadataError::new(
                entity_type,
                match bundle {
                    Some(bundle) => format!(
                        "column '{column}' of field '{field}' is declared twice for bundle '{bundle}'"
                    ),
                    None => format!("column '{column}' of field '{field}' is declared twice"),
                },
            )
        };

        let declarations = self
            .columns
            .entry((field.to_owned(), column.to_owned()))
            .or_default();
        match bundle {
            None if declarations.shared.is_some() => return Err(duplicate()),
            None => declarations.shared = Some(mapping),
            Some(bundle) if declarations.bundles.contains_key(bundle) => return Err(duplicate()),
            Some(bundle) => {
                declarations.bundles.insert(bundle.to_owned(), mapping);
            }
        }
        Ok(())
    }

    /// Maps the bundle key onto `rdf:type`, unless the field definitions already map it.
    fn add_bundle_key(&mut self, bundle_key: &str) {
        if self.main_properties.contains_key(bundle_key) {
            return;
        }

        self.main_properties
            .insert(bundle_key.to_owned(), BUNDLE_KEY_COLUMN.to_owned());
        self.columns.insert(
            (bundle_key.to_owned(), BUNDLE_KEY_COLUMN.to_owned()),
            ColumnDeclarations {
                shared: Some(ColumnMapping::new(
                    vec![rdf::TYPE.into_owned()],
                    FieldFormat::Resource,
                    DataType::AnyUri,
                )),
                bundles: BTreeMap::new(),
            },
        );
    }

    fn finish(self, bundles: BundleMapping) -> EntityTypeMapping {
        let mut fields = BTreeMap::new();
        for ((field, column), declarations) in self.columns {
            let Some(main_property) = self.main_properties.get(&field) else {
                continue;
            };
            let shared = declarations.shared.is_some();
            let default = match declarations.shared {
                Some(mapping) => mapping,
                None => derive_default(self.entity_type, &field, &column, &declarations.bundles),
            };
            fields.insert(
                (field, column),
                FieldMapping::new(main_property.clone(), default, shared, declarations.bundles),
            );
        }

        tracing::debug!(
            entity_type = self.entity_type,
            columns = fields.len(),
            bundles = bundles.len(),
            "Built mapping table"
        );
        EntityTypeMapping::new(
            self.entity_type.to_owned(),
            self.main_properties,
            fields,
            bundles,
        )
    }
}

/// Orders field definitions by field and bundle. The remaining components order duplicate
/// declarations of the same field and bundle.
fn sort_key(definition: &FieldDefinition) -> (&str, Option<&str>, &str, &[ColumnDefinition]) {
    (
        &definition.field,
        definition.bundle.as_deref(),
        &definition.main_property,
        &definition.columns,
    )
}

/// Derives the field-level mapping of a field that is only declared per bundle.
///
/// The predicates are the union of all bundle predicates. Format and data type are taken from the
/// first bundle in lexical order.
fn derive_default(
    entity_type: &str,
    field: &str,
    column: &str,
    bundles: &BTreeMap<String, ColumnMapping>,
) -> ColumnMapping {
    let predicates = bundles
        .values()
        .flat_map(ColumnMapping::predicates)
        .unique()
        .cloned()
        .collect();

    let mut mappings = bundles.values();
    let (format, data_type) = mappings
        .next()
        .map_or((FieldFormat::Literal, DataType::default()), |first| {
            (first.format(), first.data_type())
        });
    if mappings.any(|mapping| mapping.format() != format || mapping.data_type() != data_type) {
        tracing::warn!(
            entity_type,
            field,
            column,
            format = %format,
            "Bundles disagree on the format of a field; using the first bundle for the field-level mapping"
        );
    }

    ColumnMapping::new(predicates, format, data_type)
}
