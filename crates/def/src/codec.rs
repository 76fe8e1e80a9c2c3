//! Conversion of user-entered text into typed values.
//!
//! Every field type has one textual form, and decoding canonicalizes to it:
//! `decode(ty, &decode(ty, raw)?.to_string())` yields the same value.

use {
    crate::{
        value::{DATE_FORMAT, INTERVAL_SEPARATOR},
        DataType, Row, Schema, Value,
    },
    chrono::NaiveDate,
    snafu::prelude::*,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(r#"invalid format: "{}" is not a valid {}"#, value, data_type))]
    Format { value: String, data_type: DataType },

    #[snafu(display(
        "the count of values ({}) does not match the count of fields ({})",
        actual,
        expected
    ))]
    Arity { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn decode(data_type: DataType, raw: &str) -> Result<Value> {
    let value = match data_type {
        DataType::Integer => raw.trim().parse().ok().map(Value::Integer),
        DataType::Real => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Real),
        DataType::Char => Some(Value::Char(raw.to_string())),
        DataType::String => Some(Value::String(raw.to_string())),
        DataType::Date => parse_date(raw).map(Value::Date),
        DataType::DateInterval => parse_interval(raw),
    };

    value.context(FormatSnafu {
        value: raw,
        data_type,
    })
}

/// Decodes one token per field. The row is rejected as a whole on the first
/// token that fails.
pub fn decode_row<S: AsRef<str>>(schema: &Schema, tokens: &[S]) -> Result<Row> {
    ensure!(
        tokens.len() == schema.len(),
        AritySnafu {
            expected: schema.len(),
            actual: tokens.len(),
        }
    );

    schema
        .iter()
        .zip(tokens)
        .map(|(field, token)| decode(field.data_type, token.as_ref()))
        .collect()
}

/// Accepts `YYYY-M-D` with a four digit year and one or two digit month and
/// day. chrono alone would also take signs and blanks before each number.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let shaped = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4..=4) && digits(month, 1..=2) && digits(day, 1..=2)
        }
        _ => false,
    };
    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn digits(part: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

fn parse_interval(raw: &str) -> Option<Value> {
    let mut parts = raw.split(INTERVAL_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => {
            Some(Value::DateInterval(parse_date(start)?, parse_date(end)?))
        }
        _ => None,
    }
}
