//! Common GraphQL types

use async_graphql::{Scalar, ScalarType, Value};
use chrono::{DateTime, NaiveDate};

/// Calendar date scalar used by `startDate`/`endDate` filters
///
/// Accepts `YYYY-MM-DD` as well as a full RFC 3339 timestamp, in which case
/// the UTC calendar day is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(pub NaiveDate);

impl Date {
    pub fn from_iso8601(s: &str) -> Result<Self, String> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Date(date));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Date(dt.naive_utc().date()))
            .map_err(|e| format!("Invalid Date: {}", e))
    }
}

#[Scalar]
impl ScalarType for Date {
    fn parse(value: Value) -> async_graphql::InputValueResult<Self> {
        if let Value::String(s) = value {
            Ok(Date::from_iso8601(&s)?)
        } else {
            Err("Expected string for Date".into())
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.format("%Y-%m-%d").to_string())
    }
}
