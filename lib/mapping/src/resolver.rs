use crate::field::{ColumnMapping, FieldMapping};
use crate::table::EntityTypeMapping;
use rdf_entity_model::{FieldFormat, NamedNode, UnmappedFieldError};

/// A (field, column) pair resolved against a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField<'table> {
    /// The effective column, i.e., the requested column or the field's main property.
    pub column: &'table str,
    /// The mapping of the (field, column) pair with all bundle overrides.
    pub field: &'table FieldMapping,
    /// The mapping that applies to the requested bundle.
    pub mapping: &'table ColumnMapping,
}

impl EntityTypeMapping {
    /// Resolves the mapping of a field column.
    ///
    /// The precedence is: the bundle override, then the field-level mapping, for the requested
    /// column or the field's main property if no column is given.
    ///
    /// # Errors
    ///
    /// Returns an [UnmappedFieldError] if the field is unknown, if the column has no predicates,
    /// or if the field is only declared for other bundles.
    pub fn resolve(
        &self,
        field: &str,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> Result<ResolvedField<'_>, UnmappedFieldError> {
        let unmapped = |column: Option<&str>| UnmappedFieldError {
            entity_type: self.entity_type().to_owned(),
            field: field.to_owned(),
            column: column.map(str::to_owned),
            bundle: bundle.map(str::to_owned),
        };

        let requested = match column {
            Some(column) => column,
            None => self.main_property(field).ok_or_else(|| unmapped(None))?,
        };
        let (column, field_mapping) = self
            .field_entry(field, requested)
            .ok_or_else(|| unmapped(Some(requested)))?;
        let mapping = field_mapping
            .mapping_for(bundle)
            .ok_or_else(|| unmapped(Some(requested)))?;
        Ok(ResolvedField {
            column,
            field: field_mapping,
            mapping,
        })
    }

    /// Returns the ordered predicates of a field column.
    pub fn field_predicates(
        &self,
        field: &str,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> Result<&[NamedNode], UnmappedFieldError> {
        let resolved = self.resolve(field, column, bundle)?;
        Ok(resolved.mapping.predicates())
    }

    /// Returns the formats of a field column.
    ///
    /// With a bundle, this is the single format that applies to the bundle. Without a bundle,
    /// this is every distinct format of the field-level mapping and the bundle overrides.
    pub fn field_formats(
        &self,
        field: &str,
        column: Option<&str>,
        bundle: Option<&str>,
    ) -> Result<Vec<FieldFormat>, UnmappedFieldError> {
        let resolved = self.resolve(field, column, bundle)?;
        if bundle.is_some() {
            return Ok(vec![resolved.mapping.format()]);
        }

        Ok(resolved.field.formats())
    }

    /// Whether a field column has predicates for `bundle`. Never fails.
    pub fn has_field_predicate(
        &self,
        bundle: Option<&str>,
        field: &str,
        column: Option<&str>,
    ) -> bool {
        self.resolve(field, column, bundle).is_ok()
    }
}
