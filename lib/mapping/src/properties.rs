use crate::table::EntityTypeMapping;
use itertools::Itertools;
use rdf_entity_model::NamedNode;

impl EntityTypeMapping {
    /// Returns every predicate used by the entity type, without duplicates.
    ///
    /// Predicates appear in the order of their first use, visiting the (field, column) pairs in
    /// lexical order and, for each pair, the field-level mapping before the bundle overrides.
    pub fn property_list(&self) -> Vec<NamedNode> {
        self.fields()
            .flat_map(|(_, mapping)| {
                std::iter::once(mapping.default_mapping())
                    .chain(mapping.bundle_overrides().map(|(_, column)| column))
            })
            .flat_map(|column| column.predicates())
            .unique()
            .cloned()
            .collect()
    }
}
