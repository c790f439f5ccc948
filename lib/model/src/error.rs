use crate::DataType;
use std::error::Error;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The result type of all mapping and codec operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// An error raised by the mapping engine.
///
/// Every failure mode is a distinct variant so that callers (e.g., query builders) can decide
/// whether a condition is expected (an absent field) or a configuration bug.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The field definitions of an entity type are malformed or self-inconsistent.
    #[error(transparent)]
    InvalidMetadata(#[from] InvalidMetadataError),
    /// A (field, column) pair has no mapping.
    #[error(transparent)]
    UnmappedField(#[from] UnmappedFieldError),
    /// A bundle id or bundle URI has no mapping.
    #[error(transparent)]
    UnmappedBundle(#[from] UnmappedBundleError),
    /// A value does not match the format of the field.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
    /// There is no converter for a data type.
    #[error(transparent)]
    UnsupportedDataType(#[from] UnsupportedDataTypeError),
    /// An inbound literal could not be parsed by the converter of the field's data type.
    #[error(transparent)]
    MalformedLiteral(#[from] MalformedLiteralError),
    /// The field-definition source does not know the entity type.
    #[error("Entity type '{0}' has no field definitions")]
    UnknownEntityType(String),
    /// A single bundle was requested for a URI that is shared by several bundles.
    #[error(
        "URI <{uri}> is mapped to several bundles of entity type '{entity_type}': {}",
        .bundles.join(", ")
    )]
    AmbiguousBundle {
        entity_type: String,
        uri: String,
        bundles: Vec<String>,
    },
    /// A translatable literal was encoded without a langcode and no language-neutral default is
    /// configured.
    #[error("Field '{field}' of entity type '{entity_type}' is translatable and requires a langcode")]
    MissingLangcode { entity_type: String, field: String },
    /// An error reported by the field-definition source.
    #[error("{0}")]
    Source(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl MappingError {
    /// Wraps an error of an external field-definition source.
    pub fn from_source(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Source(error.into())
    }

    /// Returns true if the error signals an absent field mapping.
    pub fn is_unmapped_field(&self) -> bool {
        matches!(self, MappingError::UnmappedField(_))
    }
}

/// Raised when building a mapping table from field definitions that are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field definitions for entity type '{entity_type}': {reason}")]
pub struct InvalidMetadataError {
    pub entity_type: String,
    pub reason: String,
}

impl InvalidMetadataError {
    pub fn new(entity_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            reason: reason.into(),
        }
    }
}

/// Raised when a predicate or format is requested for a (field, column) pair without mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct UnmappedFieldError {
    pub entity_type: String,
    pub field: String,
    /// The requested column. `None` if no column was requested and the field is unknown.
    pub column: Option<String>,
    pub bundle: Option<String>,
}

impl Display for UnmappedFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}'", self.field)?;
        if let Some(column) = &self.column {
            write!(f, " (column '{column}')")?;
        }
        write!(f, " of entity type '{}'", self.entity_type)?;
        if let Some(bundle) = &self.bundle {
            write!(f, " in bundle '{bundle}'")?;
        }
        f.write_str(" is not mapped")
    }
}

/// The direction of a failed bundle lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleLookup {
    /// From bundle ids to URIs.
    Outbound,
    /// From a URI to bundle ids.
    Inbound,
}

/// Raised when a bundle id (outbound) or a bundle URI (inbound) has no mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct UnmappedBundleError {
    pub entity_type: String,
    pub lookup: BundleLookup,
    /// The offending bundle ids for outbound lookups, or the URI for inbound lookups.
    pub keys: Vec<String>,
}

impl UnmappedBundleError {
    pub fn outbound(entity_type: impl Into<String>, bundles: Vec<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            lookup: BundleLookup::Outbound,
            keys: bundles,
        }
    }

    pub fn inbound(entity_type: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            lookup: BundleLookup::Inbound,
            keys: vec![uri.into()],
        }
    }
}

impl Display for UnmappedBundleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.lookup {
            BundleLookup::Outbound => write!(
                f,
                "Bundles of entity type '{}' without URI mapping: {}",
                self.entity_type,
                self.keys.join(", ")
            ),
            BundleLookup::Inbound => write!(
                f,
                "No bundle of entity type '{}' is mapped to <{}>",
                self.entity_type,
                self.keys.join(", ")
            ),
        }
    }
}

/// Raised when an outbound value (or an inbound term) does not have the shape required by the
/// field's format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Field '{field}' expects {expected} but got {found}")]
pub struct TypeMismatchError {
    pub field: String,
    pub expected: String,
    pub found: String,
}

impl TypeMismatchError {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Raised when no converter is registered for a data type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No converter is registered for data type '{data_type}'")]
pub struct UnsupportedDataTypeError {
    pub data_type: String,
}

impl UnsupportedDataTypeError {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
        }
    }
}

impl From<DataType> for UnsupportedDataTypeError {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type.name())
    }
}

/// Raised when the lexical form of an inbound literal is not valid for the field's data type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Literal \"{lexical}\" of field '{field}' is not a valid {data_type}: {reason}")]
pub struct MalformedLiteralError {
    pub field: String,
    pub data_type: DataType,
    pub lexical: String,
    pub reason: String,
}
