use crate::UnsupportedDataTypeError;
use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const XSD_PREFIX: &str = "xsd:";

/// The primitive type of a field column.
///
/// Each data type has a canonical [XML Schema datatype](https://www.w3.org/TR/xmlschema11-2/) that
/// is attached to the literals produced for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DataType {
    /// [xsd:string](https://www.w3.org/TR/xmlschema11-2/#string)
    #[default]
    String,
    /// [xsd:boolean](https://www.w3.org/TR/xmlschema11-2/#boolean)
    Boolean,
    /// [xsd:integer](https://www.w3.org/TR/xmlschema11-2/#integer)
    Integer,
    /// [xsd:decimal](https://www.w3.org/TR/xmlschema11-2/#decimal)
    Decimal,
    /// [xsd:double](https://www.w3.org/TR/xmlschema11-2/#double)
    Double,
    /// [xsd:date](https://www.w3.org/TR/xmlschema11-2/#date)
    Date,
    /// [xsd:dateTime](https://www.w3.org/TR/xmlschema11-2/#dateTime)
    DateTime,
    /// [xsd:time](https://www.w3.org/TR/xmlschema11-2/#time)
    Time,
    /// [xsd:duration](https://www.w3.org/TR/xmlschema11-2/#duration)
    Duration,
    /// [xsd:anyURI](https://www.w3.org/TR/xmlschema11-2/#anyURI)
    AnyUri,
}

impl DataType {
    /// All data types, in their canonical order.
    pub const ALL: [DataType; 10] = [
        DataType::String,
        DataType::Boolean,
        DataType::Integer,
        DataType::Decimal,
        DataType::Double,
        DataType::Date,
        DataType::DateTime,
        DataType::Time,
        DataType::Duration,
        DataType::AnyUri,
    ];

    /// Returns the name of the data type as used in field definitions.
    pub fn name(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Decimal => "decimal",
            DataType::Double => "double",
            DataType::Date => "date",
            DataType::DateTime => "date_time",
            DataType::Time => "time",
            DataType::Duration => "duration",
            DataType::AnyUri => "any_uri",
        }
    }

    /// Returns the canonical XML Schema datatype IRI.
    pub fn datatype(self) -> NamedNodeRef<'static> {
        match self {
            DataType::String => xsd::STRING,
            DataType::Boolean => xsd::BOOLEAN,
            DataType::Integer => xsd::INTEGER,
            DataType::Decimal => xsd::DECIMAL,
            DataType::Double => xsd::DOUBLE,
            DataType::Date => xsd::DATE,
            DataType::DateTime => xsd::DATE_TIME,
            DataType::Time => xsd::TIME,
            DataType::Duration => xsd::DURATION,
            DataType::AnyUri => xsd::ANY_URI,
        }
    }

    /// Finds the data type whose canonical datatype IRI is `datatype`.
    pub fn from_datatype(datatype: NamedNodeRef<'_>) -> Option<DataType> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.datatype() == datatype)
    }

    fn local_name(self) -> &'static str {
        let iri = self.datatype().as_str();
        iri.rsplit_once('#').map_or(iri, |(_, local)| local)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a data type name. Accepts the plain name (`date_time`), the prefixed XML Schema name
/// (`xsd:dateTime`), or the full datatype IRI.
impl FromStr for DataType {
    type Err = UnsupportedDataTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let prefixed = input.strip_prefix(XSD_PREFIX);
        DataType::ALL
            .into_iter()
            .find(|data_type| {
                data_type.name() == input
                    || prefixed == Some(data_type.local_name())
                    || data_type.datatype().as_str() == input
            })
            .ok_or_else(|| UnsupportedDataTypeError::new(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_spellings() {
        assert_eq!("date_time".parse(), Ok(DataType::DateTime));
        assert_eq!("xsd:dateTime".parse(), Ok(DataType::DateTime));
        assert_eq!(
            "http://www.w3.org/2001/XMLSchema#dateTime".parse(),
            Ok(DataType::DateTime)
        );
        assert_eq!("xsd:anyURI".parse(), Ok(DataType::AnyUri));
    }

    #[test]
    fn names_round_trip() {
        for data_type in DataType::ALL {
            assert_eq!(data_type.name().parse(), Ok(data_type));
            assert_eq!(DataType::from_datatype(data_type.datatype()), Some(data_type));
        }
    }

    #[test]
    fn unknown_name() {
        let error = "xsd:gYear".parse::<DataType>().unwrap_err();
        insta::assert_snapshot!(error, @"No converter is registered for data type 'xsd:gYear'");
    }
}
