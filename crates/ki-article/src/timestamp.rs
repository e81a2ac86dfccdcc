//! Lenient `savedAt` timestamp handling.
//!
//! Collaborator modules write timestamps in several ISO-8601 shapes. A value
//! that cannot be understood becomes `None` rather than failing the corpus load.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T08:00:00Z`, with any offset), a naive
/// date-time taken as UTC (`2024-05-01T08:00:00`), or a bare date taken as
/// midnight UTC (`2024-05-01`).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Deserializes an optional timestamp, mapping anything unparseable to `None`.
///
/// Strings go through [`parse_timestamp`]; integers are read as Unix epoch
/// milliseconds.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => parse_timestamp(&s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}
