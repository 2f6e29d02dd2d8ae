//! ISO-8601 timestamp parsing for the formats upstream services send.
//!
//! Values carry no offset of their own (a trailing `Z` is accepted but not
//! trusted), so the caller names the zone they are local to. UTC is the
//! default.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Accepted layouts, tried in order.
const FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
];

const MIN_YEAR: i32 = 1900;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateStringError {
    #[error("unsupported date format: {0}")]
    UnsupportedFormat(String),

    #[error("date {input} is out of range: year must be >= 1900")]
    OutOfRange { input: String },

    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    #[error("local time {input} is ambiguous or skipped in the requested time zone")]
    InvalidLocalTime { input: String },
}

/// Parse an ISO-8601 date string as UTC.
///
/// # Errors
/// See [`parse_datestring_in`].
pub fn parse_datestring(input: &str) -> Result<DateTime<Utc>, DateStringError> {
    parse_datestring_in(input, &Utc)
}

/// Parse an ISO-8601 date string as local time in the IANA zone `tz_name`,
/// e.g. `"America/Los_Angeles"`.
///
/// # Errors
/// [`DateStringError::UnknownZone`] when `tz_name` is not an IANA zone, plus
/// everything [`parse_datestring_in`] returns.
pub fn parse_datestring_tz(input: &str, tz_name: &str) -> Result<DateTime<Tz>, DateStringError> {
    let zone: Tz = tz_name
        .parse()
        .map_err(|_| DateStringError::UnknownZone(tz_name.to_owned()))?;
    parse_datestring_in(input, &zone)
}

/// Parse an ISO-8601 date string as local time in `zone`.
///
/// # Errors
/// - [`DateStringError::UnsupportedFormat`] when no accepted layout matches
/// - [`DateStringError::OutOfRange`] when the year is before 1900
/// - [`DateStringError::InvalidLocalTime`] when the wall-clock time falls in
///   a DST gap or overlap of `zone`
pub fn parse_datestring_in<Z: TimeZone>(
    input: &str,
    zone: &Z,
) -> Result<DateTime<Z>, DateStringError> {
    let parsed = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| DateStringError::UnsupportedFormat(input.to_owned()))?;

    if parsed.year() < MIN_YEAR {
        return Err(DateStringError::OutOfRange {
            input: input.to_owned(),
        });
    }

    zone.from_local_datetime(&parsed)
        .single()
        .ok_or_else(|| DateStringError::InvalidLocalTime {
            input: input.to_owned(),
        })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn parses_all_accepted_layouts() {
        let expected = Utc.with_ymd_and_hms(2021, 9, 29, 13, 5, 7).unwrap();

        for input in [
            "2021-09-29T13:05:07Z",
            "2021-09-29T13:05:07",
            "2021-09-29T13:05:07.000Z",
            "2021-09-29T13:05:07.000000",
        ] {
            assert_eq!(parse_datestring(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn keeps_fractional_seconds() {
        let dt = parse_datestring("2021-09-29T13:05:07.250Z").unwrap();
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn rejects_unknown_layouts() {
        for input in ["2021-09-29", "29/09/2021 13:05", "", "yesterday"] {
            assert_eq!(
                parse_datestring(input).unwrap_err(),
                DateStringError::UnsupportedFormat(input.to_owned())
            );
        }
    }

    #[test]
    fn rejects_years_before_1900() {
        let err = parse_datestring("1899-12-31T23:59:59Z").unwrap_err();
        assert!(matches!(err, DateStringError::OutOfRange { .. }));
        assert!(err.to_string().contains("1899-12-31T23:59:59Z"));
    }

    #[test]
    fn named_zone_keeps_wall_clock_time() {
        let dt = parse_datestring_tz("2021-09-29T13:05:07", "America/Los_Angeles").unwrap();
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.timezone(), chrono_tz::America::Los_Angeles);
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2021, 9, 29, 20, 5, 7).unwrap()
        );
    }

    #[test]
    fn fixed_offset_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let dt = parse_datestring_in("2021-09-29T13:05:07.5", &ist).unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2021, 9, 29, 7, 35, 7).unwrap() + chrono::Duration::milliseconds(500)
        );
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = parse_datestring_tz("2021-09-29T13:05:07", "Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err, DateStringError::UnknownZone("Mars/Olympus_Mons".to_owned()));
    }

    #[test]
    fn skipped_local_time_is_rejected() {
        // 02:30 does not exist on 2021-03-14 in Pacific time.
        let err = parse_datestring_tz("2021-03-14T02:30:00", "America/Los_Angeles").unwrap_err();
        assert!(matches!(err, DateStringError::InvalidLocalTime { .. }));
    }
}
