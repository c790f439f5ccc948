use rdf_entity_encoding::{DataTypeRegistry, DataTypeRegistryRef};

/// The configuration of a [RdfFieldHandler](crate::RdfFieldHandler).
#[derive(Debug, Clone)]
pub struct RdfEntityConfig {
    /// The language tag of translatable literals that are written without a langcode. If `None`,
    /// a langcode is required.
    pub neutral_langcode: Option<String>,
    /// The converters of the plain literal data types.
    pub registry: DataTypeRegistryRef,
}

impl Default for RdfEntityConfig {
    fn default() -> Self {
        Self {
            neutral_langcode: None,
            registry: DataTypeRegistry::builtin(),
        }
    }
}

impl RdfEntityConfig {
    #[must_use]
    pub fn with_neutral_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.neutral_langcode = Some(langcode.into());
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: DataTypeRegistryRef) -> Self {
        self.registry = registry;
        self
    }
}
