use {
    chrono::NaiveDate,
    serde::{
        de::{self, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    },
    std::fmt::{self, Display},
};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const INTERVAL_SEPARATOR: &str = " - ";

/// A single typed cell.
///
/// Numbers persist as JSON numbers, everything else as its textual rendering.
/// Deserialization goes by JSON kind alone: a date written to disk comes back
/// as `Value::String` holding the same text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Char(String),
    String(String),
    Date(NaiveDate),
    DateInterval(NaiveDate, NaiveDate),
}

pub type Row = Vec<Value>;

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            // `{:?}` keeps the trailing `.0` on integral reals, like the JSON form
            Self::Real(v) => write!(f, "{:?}", v),
            Self::Char(s) | Self::String(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::DateInterval(start, end) => write!(
                f,
                "{}{}{}",
                start.format(DATE_FORMAT),
                INTERVAL_SEPARATOR,
                end.format(DATE_FORMAT)
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Real(v) => serializer.serialize_f64(*v),
            Self::Char(s) | Self::String(s) => serializer.serialize_str(s),
            Self::Date(_) | Self::DateInterval(..) => serializer.collect_str(self),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &"a 64-bit signed integer"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Real(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

macro_rules! value_conversions {
    ($(($raw:ty, $val:ident),)*) => {
        $(
            impl From<$raw> for Value {
                fn from(raw: $raw) -> Self {
                    Value::$val(raw)
                }
            }
        )*
    };
}

value_conversions! {
    (i64, Integer),
    (f64, Real),
    (String, String),
    (NaiveDate, Date),
}

impl From<&str> for Value {
    fn from(raw: &str) -> Self {
        Value::String(raw.to_string())
    }
}
