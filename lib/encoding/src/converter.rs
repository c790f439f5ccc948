use rdf_entity_model::{
    DataType, Date, DateTime, Decimal, Double, Duration, FieldValue, NamedNodeRef, Time,
};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Converts a native value into the lexical form of a data type.
pub type ToLexical = fn(&FieldValue) -> Result<String, ConversionError>;

/// Parses the lexical form of a data type into a native value.
pub type FromLexical = fn(&str) -> Result<FieldValue, ConversionError>;

/// The error of a [DataTypeConverter].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The native value has a kind the converter cannot handle.
    #[error("a {data_type} converter cannot convert values of kind {found}")]
    UnexpectedValue {
        data_type: DataType,
        found: &'static str,
    },
    /// The lexical form is not valid for the data type.
    #[error("\"{lexical}\" is not a valid {data_type}: {reason}")]
    InvalidLexical {
        data_type: DataType,
        lexical: String,
        reason: String,
    },
}

impl ConversionError {
    pub fn unexpected(data_type: DataType, value: &FieldValue) -> Self {
        Self::UnexpectedValue {
            data_type,
            found: value.kind(),
        }
    }

    pub fn invalid_lexical(
        data_type: DataType,
        lexical: impl Into<String>,
        reason: impl Display,
    ) -> Self {
        Self::InvalidLexical {
            data_type,
            lexical: lexical.into(),
            reason: reason.to_string(),
        }
    }
}

/// A pair of pure functions that convert between the native values and the lexical forms of a
/// [DataType].
///
/// A converter only accepts the [FieldValue] variant of its data type, so that every accepted
/// value is parsed back into itself. Converters are stateless. Literals produced for the data type
/// carry its canonical datatype IRI.
#[derive(Debug, Clone, Copy)]
pub struct DataTypeConverter {
    data_type: DataType,
    to_lexical: ToLexical,
    from_lexical: FromLexical,
}

impl DataTypeConverter {
    /// Creates a new converter for `data_type`.
    ///
    /// The functions must be inverse to each other, i.e., parsing the produced lexical form must
    /// yield the original value.
    pub fn new(data_type: DataType, to_lexical: ToLexical, from_lexical: FromLexical) -> Self {
        Self {
            data_type,
            to_lexical,
            from_lexical,
        }
    }

    /// Returns the builtin converter of `data_type`.
    pub fn builtin(data_type: DataType) -> Self {
        match data_type {
            DataType::String => Self::new(data_type, string_to_lexical, string_from_lexical),
            DataType::AnyUri => Self::new(data_type, any_uri_to_lexical, string_from_lexical),
            DataType::Boolean => Self::new(data_type, boolean_to_lexical, boolean_from_lexical),
            DataType::Integer => Self::new(data_type, integer_to_lexical, integer_from_lexical),
            DataType::Decimal => Self::new(data_type, decimal_to_lexical, decimal_from_lexical),
            DataType::Double => Self::new(data_type, double_to_lexical, double_from_lexical),
            DataType::Date => Self::new(data_type, date_to_lexical, date_from_lexical),
            DataType::DateTime => {
                Self::new(data_type, date_time_to_lexical, date_time_from_lexical)
            }
            DataType::Time => Self::new(data_type, time_to_lexical, time_from_lexical),
            DataType::Duration => Self::new(data_type, duration_to_lexical, duration_from_lexical),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The canonical datatype IRI of the produced literals.
    pub fn datatype(&self) -> NamedNodeRef<'static> {
        self.data_type.datatype()
    }

    /// Converts `value` into its lexical form.
    pub fn to_lexical(&self, value: &FieldValue) -> Result<String, ConversionError> {
        (self.to_lexical)(value)
    }

    /// Parses `lexical` into a native value.
    pub fn from_lexical(&self, lexical: &str) -> Result<FieldValue, ConversionError> {
        (self.from_lexical)(lexical)
    }
}

/// Parses a lexical form. Surrounding whitespace is collapsed as for all non-string XML Schema
/// types.
fn parse<T>(data_type: DataType, lexical: &str) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: Display,
{
    lexical
        .trim()
        .parse()
        .map_err(|error| ConversionError::invalid_lexical(data_type, lexical, error))
}

fn string_to_lexical(value: &FieldValue) -> Result<String, ConversionError> {
    match value {
        FieldValue::String(value) => Ok(value.clone()),
        other => Err(ConversionError::unexpected(DataType::String, other)),
    }
}

fn string_from_lexical(lexical: &str) -> Result<FieldValue, ConversionError> {
    Ok(FieldValue::String(lexical.to_owned()))
}

fn any_uri_to_lexical(value: &FieldValue) -> Result<String, ConversionError> {
    match value {
        FieldValue::String(value) => Ok(value.clone()),
        other => Err(ConversionError::unexpected(DataType::AnyUri, other)),
    }
}

fn parse_boolean(lexical: &str) -> Result<bool, ConversionError> {
    match lexical.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConversionError::invalid_lexical(
            DataType::Boolean,
            lexical,
            "expected one of true, false, 1, 0",
        )),
    }
}

/// Booleans are stored as `1` and `0`.
fn boolean_to_lexical(value: &FieldValue) -> Result<String, ConversionError> {
    let value = match value {
        FieldValue::Boolean(value) => *value,
        other => return Err(ConversionError::unexpected(DataType::Boolean, other)),
    };
    Ok(if value { "1" } else { "0" }.to_owned())
}

fn boolean_from_lexical(lexical: &str) -> Result<FieldValue, ConversionError> {
    parse_boolean(lexical).map(FieldValue::Boolean)
}

fn double_to_lexical(value: &FieldValue) -> Result<String, ConversionError> {
    let value = match value {
        FieldValue::Double(value) => Double::from(*value),
        other => return Err(ConversionError::unexpected(DataType::Double, other)),
    };
    Ok(value.to_string())
}

fn double_from_lexical(lexical: &str) -> Result<FieldValue, ConversionError> {
    parse::<Double>(DataType::Double, lexical).map(|value| FieldValue::Double(value.into()))
}

/// Implements the conversion functions of a data type whose native value implements [FromStr]
/// and [Display] with its canonical lexical form.
macro_rules! make_lexical_converter {
    ($TO_LEXICAL: ident, $FROM_LEXICAL: ident, $DATA_TYPE: expr, $VARIANT: ident, $VALUE_TYPE: ty) => {
        fn $TO_LEXICAL(value: &FieldValue) -> Result<String, ConversionError> {
            match value {
                FieldValue::$VARIANT(value) => Ok(value.to_string()),
                other => Err(ConversionError::unexpected($DATA_TYPE, other)),
            }
        }

        fn $FROM_LEXICAL(lexical: &str) -> Result<FieldValue, ConversionError> {
            parse::<$VALUE_TYPE>($DATA_TYPE, lexical).map(FieldValue::$VARIANT)
        }
    };
}

make_lexical_converter!(
    integer_to_lexical,
    integer_from_lexical,
    DataType::Integer,
    Integer,
    i64
);
make_lexical_converter!(
    decimal_to_lexical,
    decimal_from_lexical,
    DataType::Decimal,
    Decimal,
    Decimal
);
make_lexical_converter!(
    date_to_lexical,
    date_from_lexical,
    DataType::Date,
    Date,
    Date
);
make_lexical_converter!(
    date_time_to_lexical,
    date_time_from_lexical,
    DataType::DateTime,
    DateTime,
    DateTime
);
make_lexical_converter!(
    time_to_lexical,
    time_from_lexical,
    DataType::Time,
    Time,
    Time
);
make_lexical_converter!(
    duration_to_lexical,
    duration_from_lexical,
    DataType::Duration,
    Duration,
    Duration
);
