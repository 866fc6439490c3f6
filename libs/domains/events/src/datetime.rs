//! Serde helpers for the naive scheduled time of an event.
//!
//! Written as `YYYY-MM-DDTHH:MM:SS[.fraction]`. Read from ISO-8601 with `T` or
//! a space as separator, with or without a UTC offset, or a bare date. An
//! offset is dropped and the wall-clock part kept, so `10:00+02:00` is stored
//! as `10:00`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer, de};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Parse the accepted input forms into a wall-clock date-time.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(with_offset) = DateTime::parse_from_str(raw, format) {
            return Some(with_offset.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(OUTPUT_FORMAT).to_string()
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| {
        de::Error::custom(format!("invalid datetime '{raw}', expected ISO-8601"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 17)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_naive_forms() {
        assert_eq!(parse("2030-05-17T18:30:00"), Some(at(18, 30)));
        assert_eq!(parse("2030-05-17 18:30:00"), Some(at(18, 30)));
        assert_eq!(parse("2030-05-17"), Some(at(0, 0)));
    }

    #[test]
    fn test_parse_keeps_wall_clock_and_drops_offset() {
        assert_eq!(parse("2030-05-17T18:30:00+02:00"), Some(at(18, 30)));
        assert_eq!(parse("2030-05-17T18:30:00Z"), Some(at(18, 30)));
        assert_eq!(parse("2030-05-17 18:30:00-0500"), Some(at(18, 30)));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse("2030-05-17T18:30:00.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
        assert_eq!(format(&parsed), "2030-05-17T18:30:00.250");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse("tomorrow"), None);
        assert_eq!(parse("2030-13-01T00:00:00"), None);
    }

    #[test]
    fn test_format_whole_seconds() {
        assert_eq!(format(&at(9, 5)), "2030-05-17T09:05:00");
    }
}
