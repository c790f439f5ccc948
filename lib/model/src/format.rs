use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Describes how the values of a mapped column are serialized into RDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldFormat {
    /// The value is an IRI that references another resource.
    Resource,
    /// The value is a language-tagged literal. The language tag carries the translation identity.
    TranslatableLiteral,
    /// The value is a literal whose datatype is determined by the column's [DataType](crate::DataType).
    Literal,
}

impl FieldFormat {
    /// All formats, in their canonical order.
    pub const ALL: [FieldFormat; 3] = [
        FieldFormat::Resource,
        FieldFormat::TranslatableLiteral,
        FieldFormat::Literal,
    ];

    /// Returns the tag that is used for this format in field definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldFormat::Resource => "resource",
            FieldFormat::TranslatableLiteral => "t_literal",
            FieldFormat::Literal => "literal",
        }
    }
}

impl Display for FieldFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a format tag is none of `resource`, `t_literal`, or `literal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field format '{0}'")]
pub struct UnknownFieldFormatError(pub String);

impl FromStr for FieldFormat {
    type Err = UnknownFieldFormatError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        FieldFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == input)
            .ok_or_else(|| UnknownFieldFormatError(input.to_owned()))
    }
}
