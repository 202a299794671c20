//! Serde helper functions for stored entry rows.
//!
//! Rows written by older clients are not always well formed: optional
//! strings arrive empty, recurrence fields may be missing, hold values
//! outside the known set or have the wrong JSON type. These helpers
//! normalize that input instead of rejecting the whole row.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a timestamp in any of the accepted encodings.
///
/// Accepts naive ISO-8601 date-times (`2024-06-02T14:00[:00]`), RFC 3339
/// timestamps with an offset (kept as the wall-clock time in that offset),
/// and date-only strings (midnight of that day).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Parses a recurrence `until` bound.
///
/// A date-only value covers that whole day, so it resolves to the last
/// second of the day.
pub fn parse_until(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(23, 59, 59);
    }
    parse_timestamp(s)
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a required timestamp.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
}

/// Deserialize an optional timestamp, treating empty strings as None.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
        _ => Ok(None),
    }
}

/// A value that may not have the expected shape.
///
/// Deserializing never fails on a type mismatch: the value is consumed and
/// recorded as [`Lenient::Malformed`], leaving the caller to decide how to
/// degrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lenient<T> {
    Valid(T),
    Malformed,
}

impl<T> Lenient<T> {
    pub fn valid(self) -> Option<T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Malformed => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Valid(T),
            Malformed(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Valid(value) => Lenient::Valid(value),
            Raw::Malformed(_) => Lenient::Malformed,
        })
    }
}

/// Deserialize an optional value, treating one of the wrong shape as None.
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Lenient<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Lenient::Valid(value)) => Some(value),
        Some(Lenient::Malformed) => {
            tracing::debug!(
                expected = std::any::type_name::<T>(),
                "dropping malformed value"
            );
            None
        }
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
        timestamp_field: Option<NaiveDateTime>,
        #[serde(default, deserialize_with = "deserialize_lenient")]
        count_field: Option<u32>,
        #[serde(default)]
        shaped_field: Option<Lenient<Vec<String>>>,
    }

    fn make_datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = make_datetime(2024, 6, 2, 14, 0);
        assert_eq!(parse_timestamp("2024-06-02T14:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-02T14:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-02 14:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-02T14:00:00+02:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-06-02"),
            Some(make_datetime(2024, 6, 2, 0, 0))
        );
        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn test_deserialize_optional_timestamp_empty() {
        let json = r#"{"timestamp_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.timestamp_field, None);
    }

    #[test]
    fn test_deserialize_optional_timestamp_invalid() {
        let json = r#"{"timestamp_field": "not-a-date"}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_until_date_only_covers_whole_day() {
        assert_eq!(
            parse_until("2024-01-10"),
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(23, 59, 59)
        );
        assert_eq!(
            parse_until("2024-01-10T08:00"),
            Some(make_datetime(2024, 1, 10, 8, 0))
        );
        assert_eq!(parse_until("2024-01-03Z"), None);
    }

    #[test]
    fn test_deserialize_lenient_wrong_type_is_none() {
        let result: TestStruct = serde_json::from_str(r#"{"count_field": "two"}"#).unwrap();
        assert_eq!(result.count_field, None);

        let result: TestStruct = serde_json::from_str(r#"{"count_field": 2}"#).unwrap();
        assert_eq!(result.count_field, Some(2));

        let result: TestStruct = serde_json::from_str(r#"{"count_field": null}"#).unwrap();
        assert_eq!(result.count_field, None);
    }

    #[test]
    fn test_lenient_records_malformed() {
        let result: TestStruct =
            serde_json::from_str(r#"{"shaped_field": ["a", "b"]}"#).unwrap();
        assert_eq!(
            result.shaped_field,
            Some(Lenient::Valid(vec!["a".to_string(), "b".to_string()]))
        );

        let result: TestStruct = serde_json::from_str(r#"{"shaped_field": {"a": 1}}"#).unwrap();
        assert_eq!(result.shaped_field, Some(Lenient::Malformed));
        assert_eq!(result.shaped_field.and_then(Lenient::valid), None);
    }
}
