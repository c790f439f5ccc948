use crate::source::FieldDefinitionSourceRef;
use crate::table::EntityTypeMapping;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rdf_entity_model::{InvalidMetadataError, MappingError, MappingResult};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Caches the mapping tables of entity types.
///
/// Tables are built on first access. Concurrent first accesses may build the same table more than
/// once. Building is deterministic, so racing builders produce equal tables and the first published
/// table is kept. No lock is held while building.
///
/// Readers receive an [Arc] to an immutable table. Rebuilding or invalidating an entry replaces the
/// [Arc] atomically, so readers either observe the old or the new table.
///
/// Every invalidation and every rebuild advances a generation counter. A table is only published
/// if the generation did not change while it was built, so a build that read the definitions
/// before an invalidation never outlives it in the cache.
#[derive(Debug)]
pub struct MappingCache {
    source: FieldDefinitionSourceRef,
    tables: DashMap<String, Arc<EntityTypeMapping>, BuildHasherDefault<FxHasher>>,
    generation: AtomicU64,
}

impl MappingCache {
    /// Creates a new empty [MappingCache] that builds its tables from `source`.
    pub fn new(source: FieldDefinitionSourceRef) -> Self {
        Self {
            source,
            tables: DashMap::with_hasher(BuildHasherDefault::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &FieldDefinitionSourceRef {
        &self.source
    }

    /// Returns the mapping table of `entity_type`, building it if necessary.
    ///
    /// If the cache is invalidated while the table is built, the table is returned to the caller
    /// but not cached.
    ///
    /// # Errors
    ///
    /// Returns [MappingError::UnknownEntityType] if the source has no definitions for the entity
    /// type, or the error of building the table. Failed builds are not cached.
    pub fn get(&self, entity_type: &str) -> MappingResult<Arc<EntityTypeMapping>> {
        if let Some(table) = self.tables.get(entity_type) {
            tracing::trace!(entity_type, "Mapping table cache hit");
            return Ok(Arc::clone(table.value()));
        }

        // Must be read before the definitions.
        let generation = self.generation.load(Ordering::Acquire);
        // The shard lock must not be held while building.
        let table = self.build(entity_type)?;
        match self.tables.entry(entity_type.to_owned()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                if self.generation.load(Ordering::Acquire) != generation {
                    tracing::debug!(
                        entity_type,
                        "Discarded mapping table built before invalidation"
                    );
                    return Ok(table);
                }
                Ok(Arc::clone(entry.insert(table).value()))
            }
        }
    }

    /// Builds the table of `entity_type` from the current definitions and replaces the cached one.
    ///
    /// On error, the previously cached table is kept. If the cache is invalidated or rebuilt
    /// concurrently, the built table may be outdated and the entry is dropped instead, so that the
    /// next access builds it from the current definitions.
    pub fn rebuild(&self, entity_type: &str) -> MappingResult<Arc<EntityTypeMapping>> {
        let generation = self.generation.load(Ordering::Acquire);
        let table = self.build(entity_type)?;
        match self.tables.entry(entity_type.to_owned()) {
            Entry::Occupied(entry) if self.generation.load(Ordering::Acquire) != generation => {
                entry.remove();
                tracing::debug!(entity_type, "Dropped mapping table after concurrent change");
            }
            Entry::Vacant(_) if self.generation.load(Ordering::Acquire) != generation => {
                tracing::debug!(entity_type, "Dropped mapping table after concurrent change");
            }
            entry => {
                // Advanced while the entry is locked, so that older rebuilds see the change.
                self.generation.fetch_add(1, Ordering::AcqRel);
                entry.insert(Arc::clone(&table));
                tracing::debug!(entity_type, "Rebuilt mapping table");
            }
        }
        Ok(table)
    }

    /// Removes the table of `entity_type`. The next access rebuilds it.
    ///
    /// Returns true if a table was cached.
    pub fn invalidate(&self, entity_type: &str) -> bool {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let removed = self.tables.remove(entity_type).is_some();
        tracing::debug!(entity_type, removed, "Invalidated mapping table");
        removed
    }

    /// Removes all cached tables.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let count = self.tables.len();
        self.tables.clear();
        tracing::debug!(count, "Invalidated all mapping tables");
    }

    /// Whether a table of `entity_type` is cached.
    pub fn is_cached(&self, entity_type: &str) -> bool {
        self.tables.contains_key(entity_type)
    }

    fn build(&self, entity_type: &str) -> MappingResult<Arc<EntityTypeMapping>> {
        let definition = self
            .source
            .entity_type_definition(entity_type)?
            .ok_or_else(|| MappingError::UnknownEntityType(entity_type.to_owned()))?;
        if definition.entity_type != entity_type {
            return Err(InvalidMetadataError::new(
                entity_type,
                format!(
                    "the source returned the definitions of entity type '{}'",
                    definition.entity_type
                ),
            )
            .into());
        }
        Ok(Arc::new(EntityTypeMapping::try_new(&definition)?))
    }
}
