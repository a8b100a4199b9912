//! Day-granularity date handling.
//!
//! The dashboard sends dates either as plain `YYYY-MM-DD` strings or as full
//! ISO-8601 timestamps. Every date entering the ledger is truncated to its
//! calendar day before it is compared or stored.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parse an ISO-8601 date or date-time, discarding any time-of-day component.
pub fn parse_day(input: &str) -> Result<NaiveDate, String> {
    let value = input.trim();

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts.date());
        }
    }

    Err(format!("Invalid date: {}", input))
}

pub fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_opt_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_day(&raw).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_day("2025-06-01"), Ok(day(2025, 6, 1)));
    }

    #[test]
    fn test_time_of_day_is_discarded() {
        assert_eq!(parse_day("2025-06-01T23:59:59"), Ok(day(2025, 6, 1)));
        assert_eq!(parse_day("2025-06-01T08:30:00.000Z"), Ok(day(2025, 6, 1)));
        assert_eq!(parse_day("2025-06-01T08:30:00+02:00"), Ok(day(2025, 6, 1)));
        assert_eq!(parse_day("2025-06-01 10:00:00"), Ok(day(2025, 6, 1)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_day("next tuesday").is_err());
        assert!(parse_day("2025-13-01").is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "deserialize_day")]
            at: NaiveDate,
            #[serde(default, deserialize_with = "deserialize_opt_day")]
            until: Option<NaiveDate>,
        }

        let probe: Probe = serde_json::from_str(r#"{"at":"2025-06-04T12:00:00Z"}"#).unwrap();
        assert_eq!(probe.at, day(2025, 6, 4));
        assert_eq!(probe.until, None);
    }
}
