use crate::date::parse_timestamp;
use crate::money::Money;
use chrono::{DateTime, NaiveDateTime};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loosely typed JSON leaf. The backend sends the same field as a number in one record and
/// a string in the next, so raw structs hold these instead of guessing.
///
/// Objects and arrays land in `Unreadable` so one odd field never costs the whole record.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
    Unreadable(serde_json::Value),
}

impl Scalar {
    pub fn text(&self) -> Option<String> {
        match self {
            Scalar::Unreadable(_) => None,
            _ => Some(self.to_string()),
        }
    }

    pub fn money(&self) -> Money {
        match self {
            Scalar::Number(n) => Money::lenient(&n.to_string()),
            Scalar::Text(s) => Money::lenient(s),
            Scalar::Flag(_) | Scalar::Unreadable(_) => Money::zero(),
        }
    }

    /// Numbers are epoch milliseconds, text goes through `parse_timestamp`.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Scalar::Number(n) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|d| d.naive_utc()),
            Scalar::Text(s) => parse_timestamp(s),
            Scalar::Flag(_) | Scalar::Unreadable(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Flag(b) => write!(f, "{}", b),
            Scalar::Unreadable(v) => write!(f, "{}", v),
        }
    }
}

/// Text of a field that is present and not empty.
pub fn present(field: &Option<Scalar>) -> Option<String> {
    field
        .as_ref()
        .and_then(Scalar::text)
        .filter(|text| !text.is_empty())
}

/// Text of a field that is present and not just whitespace.
pub fn non_blank(field: &Option<Scalar>) -> Option<String> {
    present(field).filter(|text| !text.trim().is_empty())
}

/// Missing amounts count as zero.
pub fn money(field: &Option<Scalar>) -> Money {
    field.as_ref().map_or_else(Money::zero, Scalar::money)
}

/// Missing or unreadable dates are `None`.
pub fn timestamp(field: &Option<Scalar>) -> Option<NaiveDateTime> {
    field.as_ref().and_then(Scalar::timestamp)
}
