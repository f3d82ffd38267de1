//! Publish-date normalization.
//!
//! Feeds disagree on date formats. RSS is supposed to use RFC 2822 and Atom
//! RFC 3339, but real feeds mix in naive ISO timestamps, bare dates and
//! RFC 2822 without a zone. Anything we cannot read becomes
//! [`PublishedDate::Unknown`] instead of failing the record.

use crate::models::PublishedDate;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Date-times that carry a numeric offset chrono's RFC parsers reject,
/// such as `2025-03-03T10:15:00+0200`.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%d %B %Y %H:%M:%S %z",
    "%d %B %Y %H:%M %z",
];

/// `%B` also accepts abbreviated month names when parsing.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %B %Y"];

/// Normalize a raw feed date into a calendar date.
///
/// The date is taken in the publisher's own offset, so
/// `Mon, 03 Mar 2025 23:30:00 -0500` stays on the 3rd. A leading weekday is
/// ignored when the strict RFC 2822 parse fails, which covers feeds that
/// write the wrong weekday, a full weekday name or a full month name.
///
/// # Arguments
///
/// * `raw` - The date string exactly as the feed wrote it
///
/// # Returns
///
/// [`PublishedDate::Known`] for anything recognizable, otherwise
/// [`PublishedDate::Unknown`]. Never fails.
///
/// # Examples
///
/// ```
/// use titulares::dates::normalize_date;
/// use titulares::models::PublishedDate;
///
/// assert!(normalize_date("Mon, 03 Mar 2025 10:15:00 GMT").is_known());
/// assert_eq!(normalize_date("No disponible"), PublishedDate::Unknown);
/// ```
pub fn normalize_date(raw: &str) -> PublishedDate {
    let s = raw.trim();
    if s.is_empty() {
        return PublishedDate::Unknown;
    }

    match parse_any(s).or_else(|| strip_weekday(s).and_then(parse_any)) {
        Some(date) => PublishedDate::Known(date),
        None => {
            debug!(raw = %s, "Unparseable publish date; using sentinel");
            PublishedDate::Unknown
        }
    }
}

fn parse_any(s: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
        .map(|dt| dt.date_naive())
        .or_else(|| {
            OFFSET_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date_naive())
        })
        .or_else(|| parse_naive(s))
        .or_else(|| strip_trailing_zone(s).and_then(parse_naive))
}

fn parse_naive(s: &str) -> Option<NaiveDate> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// `Monday, 03 Mar ...` -> `03 Mar ...`
fn strip_weekday(s: &str) -> Option<&str> {
    let (head, tail) = s.split_once(',')?;
    (!head.is_empty() && head.chars().all(|c| c.is_alphabetic())).then_some(tail.trim())
}

/// Drop a trailing zone token chrono does not know, e.g. `... 10:00:00 CEST`.
fn strip_trailing_zone(s: &str) -> Option<&str> {
    let (head, tail) = s.rsplit_once(' ')?;
    tail.chars()
        .all(|c| c.is_ascii_alphabetic())
        .then_some(head)
}
