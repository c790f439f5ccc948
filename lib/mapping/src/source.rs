use dashmap::DashMap;
use rdf_entity_model::{EntityTypeDefinition, MappingResult};
use rustc_hash::FxHasher;
use std::fmt::Debug;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

/// A reference-counted pointer to an implementation of the [FieldDefinitionSource] trait.
pub type FieldDefinitionSourceRef = Arc<dyn FieldDefinitionSource>;

/// Supplies the raw field definitions of entity types.
///
/// This is the seam to the field-discovery layer of the embedding application. The mapping engine
/// only reads the definitions and never persists them.
pub trait FieldDefinitionSource: Debug + Send + Sync {
    /// Returns the field definitions of `entity_type`, or `None` if the entity type is unknown.
    ///
    /// Errors of the underlying discovery mechanism should be wrapped with
    /// [MappingError::from_source](rdf_entity_model::MappingError::from_source).
    fn entity_type_definition(&self, entity_type: &str)
        -> MappingResult<Option<EntityTypeDefinition>>;
}

/// Keeps field definitions in memory.
///
/// Replacing a definition does not affect already built mapping tables. Callers must invalidate
/// the [MappingCache](crate::MappingCache) afterward.
#[derive(Debug, Default)]
pub struct MemFieldDefinitions {
    definitions: DashMap<String, EntityTypeDefinition, BuildHasherDefault<FxHasher>>,
}

impl MemFieldDefinitions {
    /// Creates a new empty [MemFieldDefinitions].
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the definitions of an entity type. Returns the replaced definitions, if any.
    pub fn insert(&self, definition: EntityTypeDefinition) -> Option<EntityTypeDefinition> {
        self.definitions
            .insert(definition.entity_type.clone(), definition)
    }

    pub fn remove(&self, entity_type: &str) -> Option<EntityTypeDefinition> {
        self.definitions
            .remove(entity_type)
            .map(|(_, definition)| definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<EntityTypeDefinition> for MemFieldDefinitions {
    fn from_iter<T: IntoIterator<Item = EntityTypeDefinition>>(iter: T) -> Self {
        let definitions = Self::new();
        for definition in iter {
            definitions.insert(definition);
        }
        definitions
    }
}

impl FieldDefinitionSource for MemFieldDefinitions {
    fn entity_type_definition(
        &self,
        entity_type: &str,
    ) -> MappingResult<Option<EntityTypeDefinition>> {
        Ok(self
            .definitions
            .get(entity_type)
            .map(|definition| definition.value().clone()))
    }
}
