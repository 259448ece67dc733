//! Timestamp parsing and calendar-day bucketing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Naive date-time layouts accepted when no offset is present. These are
/// read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Space-separated layout with an offset, as emitted by Postgres
/// (`2024-01-10 12:00:00+00`).
const SPACED_OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

/// Parse a record timestamp into an instant.
///
/// Returns `None` for anything that is not a recognisable date. There is no
/// fallback value: an unparsable timestamp must not turn into a real day.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, SPACED_OFFSET_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    // `Wed, 10 Jan 2024 12:00:00 GMT`, as written by `Date.toUTCString()`
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The calendar day a timestamp falls on in `zone`.
pub fn calendar_day(raw: &str, zone: &FixedOffset) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|instant| day_of(instant, zone))
}

/// The calendar day of an instant in `zone`.
pub fn day_of(instant: DateTime<Utc>, zone: &FixedOffset) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}
