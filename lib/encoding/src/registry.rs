use crate::converter::DataTypeConverter;
use rdf_entity_model::{DataType, UnsupportedDataTypeError};
use rustc_hash::FxHashMap;
use std::sync::{Arc, LazyLock};

/// A reference-counted pointer to a [DataTypeRegistry].
pub type DataTypeRegistryRef = Arc<DataTypeRegistry>;

static BUILTIN_REGISTRY: LazyLock<DataTypeRegistryRef> =
    LazyLock::new(|| Arc::new(DataTypeRegistry::default()));

/// Maps each supported [DataType] to its [DataTypeConverter].
///
/// A registry is immutable once built. Use a [DataTypeRegistryBuilder] to register custom
/// converters before handing the registry to a codec.
#[derive(Debug, Clone)]
pub struct DataTypeRegistry {
    converters: FxHashMap<DataType, DataTypeConverter>,
}

impl DataTypeRegistry {
    /// Creates a registry without any converter.
    pub fn empty() -> Self {
        Self {
            converters: FxHashMap::default(),
        }
    }

    /// Returns the shared registry of the builtin converters.
    pub fn builtin() -> DataTypeRegistryRef {
        Arc::clone(&BUILTIN_REGISTRY)
    }

    /// Returns a builder that starts with the builtin converters.
    pub fn builder() -> DataTypeRegistryBuilder {
        DataTypeRegistryBuilder {
            registry: Self::default(),
        }
    }

    /// Returns the converter of `data_type`.
    pub fn converter(
        &self,
        data_type: DataType,
    ) -> Result<&DataTypeConverter, UnsupportedDataTypeError> {
        self.converters
            .get(&data_type)
            .ok_or_else(|| UnsupportedDataTypeError::from(data_type))
    }

    /// Returns the data types with a registered converter, in their canonical order.
    pub fn supported_data_types(&self) -> Vec<DataType> {
        let mut data_types = self.converters.keys().copied().collect::<Vec<_>>();
        data_types.sort_unstable();
        data_types
    }
}

/// Registers a converter for every [DataType].
impl Default for DataTypeRegistry {
    fn default() -> Self {
        let converters = DataType::ALL
            .into_iter()
            .map(|data_type| (data_type, DataTypeConverter::builtin(data_type)))
            .collect();
        Self { converters }
    }
}

/// Builds a [DataTypeRegistry].
#[derive(Debug, Clone)]
pub struct DataTypeRegistryBuilder {
    registry: DataTypeRegistry,
}

impl DataTypeRegistryBuilder {
    /// Registers `converter`, replacing the converter of the same data type.
    #[must_use]
    pub fn register(mut self, converter: DataTypeConverter) -> Self {
        self.registry
            .converters
            .insert(converter.data_type(), converter);
        self
    }

    /// Removes the converter of `data_type`.
    #[must_use]
    pub fn without(mut self, data_type: DataType) -> Self {
        self.registry.converters.remove(&data_type);
        self
    }

    pub fn build(self) -> DataTypeRegistry {
        self.registry
    }
}
