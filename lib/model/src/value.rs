use oxsdatatypes::{Date, DateTime, Decimal, Duration, Time};
use std::fmt::{Display, Formatter};

/// A native field value, i.e., the value of a field column as seen by the entity storage.
///
/// The codec converts these values into RDF terms (outbound) and back (inbound).
#[derive(Clone, PartialEq, Debug)]
pub enum FieldValue {
    /// A string. Also used for resource references (IRIs) and translatable text.
    String(String),
    /// A boolean flag.
    Boolean(bool),
    /// A signed integer.
    Integer(i64),
    /// An arbitrary-precision decimal.
    Decimal(Decimal),
    /// A double precision float.
    Double(f64),
    /// A calendar date.
    Date(Date),
    /// A point in time.
    DateTime(DateTime),
    /// A time of day.
    Time(Time),
    /// A duration.
    Duration(Duration),
}

impl FieldValue {
    /// A short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Double(_) => "double",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "date_time",
            FieldValue::Time(_) => "time",
            FieldValue::Duration(_) => "duration",
        }
    }

    /// Returns the string if this is a [FieldValue::String].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(value) => Some(value),
            _ => None,
        }
    }
}

/// Writes the XML Schema lexical form of the value.
impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::String(value) => f.write_str(value),
            FieldValue::Boolean(value) => value.fmt(f),
            FieldValue::Integer(value) => value.fmt(f),
            FieldValue::Decimal(value) => value.fmt(f),
            FieldValue::Double(value) => oxsdatatypes::Double::from(*value).fmt(f),
            FieldValue::Date(value) => value.fmt(f),
            FieldValue::DateTime(value) => value.fmt(f),
            FieldValue::Time(value) => value.fmt(f),
            FieldValue::Duration(value) => value.fmt(f),
        }
    }
}

macro_rules! impl_from {
    ($TYPE: ty, $VARIANT: path) => {
        impl From<$TYPE> for FieldValue {
            fn from(value: $TYPE) -> Self {
                $VARIANT(value)
            }
        }
    };
}

impl_from!(String, FieldValue::String);
impl_from!(bool, FieldValue::Boolean);
impl_from!(i64, FieldValue::Integer);
impl_from!(Decimal, FieldValue::Decimal);
impl_from!(f64, FieldValue::Double);
impl_from!(Date, FieldValue::Date);
impl_from!(DateTime, FieldValue::DateTime);
impl_from!(Time, FieldValue::Time);
impl_from!(Duration, FieldValue::Duration);

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_lexical_forms() {
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::from(-12_i64).to_string(), "-12");
        assert_eq!(FieldValue::from(2.5_f64).to_string(), "2.5");
        assert_eq!(
            FieldValue::from(Decimal::from_str("10.50").unwrap()).to_string(),
            "10.5"
        );
        assert_eq!(
            FieldValue::from(Date::from_str("2024-02-29").unwrap()).to_string(),
            "2024-02-29"
        );
    }

    #[test]
    fn string_accessor() {
        assert_eq!(FieldValue::from("abc").as_str(), Some("abc"));
        assert_eq!(FieldValue::from(1_i64).as_str(), None);
    }
}
