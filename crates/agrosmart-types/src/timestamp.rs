//! Timestamp parsing and serde helpers.
//!
//! Timestamps are always written as RFC 3339. On input, an ISO 8601
//! date-time without an offset (`2024-05-01T12:30:00.123456`) is also
//! accepted and interpreted as UTC.
//!
//! ```
//! use agrosmart_types::timestamp;
//!
//! let utc = timestamp::parse("2024-05-01T12:30:00Z").unwrap();
//! let naive = timestamp::parse("2024-05-01T12:30:00").unwrap();
//! assert_eq!(utc, naive);
//! ```

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, ParseResult};

/// Parse a timestamp, falling back to a UTC local date-time.
pub fn parse(raw: &str) -> ParseResult<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(parsed);
    }
    PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| ParseError::InvalidTimestamp(raw.to_string()))
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> ParseResult<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}

#[cfg(feature = "serde")]
pub use self::serde_impl::{deserialize, serialize};

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    /// Serialize as RFC 3339.
    pub fn serialize<S: Serializer>(
        value: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::serialize(value, serializer)
    }

    /// Deserialize RFC 3339 or an offset-less ISO 8601 date-time.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde helpers for `YYYY-MM-DD` calendar dates.
#[cfg(feature = "serde")]
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(value: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse("2024-05-01T09:30:00-03:00").unwrap();
        assert_eq!(parsed, datetime!(2024-05-01 12:30:00 UTC));
    }

    #[test]
    fn test_parse_naive_fraction_assumes_utc() {
        let parsed = parse("2024-05-01T12:30:00.250").unwrap();
        assert_eq!(parsed, datetime!(2024-05-01 12:30:00.25 UTC));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("yesterday").unwrap_err();
        assert_eq!(err, ParseError::InvalidTimestamp("yesterday".to_string()));
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(date!(2026 - 01 - 05)), "2026-01-05");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-10-16").unwrap(), date!(2026 - 10 - 16));
        assert!(parse_date("16/10/2026").is_err());
    }
}
