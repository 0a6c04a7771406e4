//! Publish dates.
//!
//! Frontmatter dates come in many shapes; all of them are normalized to UTC
//! and written in the RFC 822 form RSS readers expect:
//!
//! ```ignore
//! let date = PubDate::parse("2024-01-01").unwrap();
//! assert_eq!(date.to_rfc822(), "Mon, 01 Jan 2024 00:00:00 GMT");
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// Date-time layouts without an offset, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, read as midnight UTC. Covers hand-written dates such
/// as `Jul 08 2022` or `July 8, 2022` next to ISO dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// An item publish date, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PubDate(DateTime<Utc>);

impl PubDate {
    /// Parse a frontmatter date.
    ///
    /// Accepted, in order: RFC 3339, naive date-times, plain dates
    /// (midnight UTC), RFC 2822.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        if let Some(naive) = NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        {
            return Some(Self(naive.and_utc()));
        }

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        {
            return date.and_hms_opt(0, 0, 0).map(|n| Self(n.and_utc()));
        }

        DateTime::parse_from_rfc2822(text)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// `Mon, 01 Jan 2024 00:00:00 GMT`
    pub fn to_rfc822(self) -> String {
        self.0.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for PubDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc822())
    }
}
