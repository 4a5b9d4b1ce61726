//! Primitive types and newtypes used in requests.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Wire format for timestamps: UTC with millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A timestamp parameter such as `updated_at_min` or `receipt_date`.
///
/// Strings are passed through untouched, on the assumption that they are
/// already ISO-8601. Date-times are converted to UTC and formatted as
/// `YYYY-MM-DDTHH:MM:SS.mmmZ`; a bare date becomes midnight UTC.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use loyverse_rs::models::Timestamp;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
/// assert_eq!(Timestamp::from(at).as_str(), "2024-03-05T14:07:09.000Z");
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(Timestamp::from(day).as_str(), "2024-03-05T00:00:00.000Z");
///
/// assert_eq!(Timestamp::from("2024-01-01T00:00:00Z").as_str(), "2024-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a pre-formatted timestamp string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Normalize a date-time in any time zone.
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string())
    }

    /// Normalize a date to midnight UTC.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
    }

    /// Get the timestamp as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Timestamp {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(at: DateTime<Tz>) -> Self {
        Self::from_datetime(&at)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// Naive date-times are taken to be UTC.
impl From<NaiveDateTime> for Timestamp {
    fn from(at: NaiveDateTime) -> Self {
        Self::from_datetime(&at.and_utc())
    }
}

/// A receipt number. Receipts are addressed by number, not UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptNumber(String);

impl ReceiptNumber {
    /// Create a receipt number from anything printable.
    pub fn new(n: impl fmt::Display) -> Self {
        Self(n.to_string())
    }

    /// Get the receipt number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReceiptNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ReceiptNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for ReceiptNumber {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<u32> for ReceiptNumber {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl From<i32> for ReceiptNumber {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}
