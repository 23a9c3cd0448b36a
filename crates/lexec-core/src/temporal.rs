//! # Temporal Types — Calendar Dates
//!
//! Defines `CalendarDate`, the date type carried by every dated legal record
//! (event dates, decision dates, incident reference dates, transit dates).
//!
//! ## Invariant
//!
//! Legal records are dated by calendar day, never by instant. A record
//! dated `2021-06-01` sorts after every record dated `2021-05-31` no matter
//! which timezone the clerk entered it in, so the type carries no time or
//! offset component at all.
//!
//! The wire form is `YYYY-MM-DD`, exactly as the record store emits it.
//! [`CalendarDate::parse()`] is strict: no timestamps, no surrounding
//! whitespace, no two-digit years.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateError;

/// A proleptic Gregorian calendar day.
///
/// Ordering is chronological, which is the only ordering the engine uses
/// when walking records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year, month and day. Returns `None` for days that
    /// do not exist (e.g. `2021-02-30`).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a date in strict `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// - [`DateError::Format`] if the string is not ten characters of
    ///   `dddd-dd-dd`.
    /// - [`DateError::OutOfRange`] if the digits name no calendar day.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(DateError::Format(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateError::OutOfRange(s.to_string()))
    }

    /// The date `days` days later, or `None` past the representable range.
    pub fn checked_add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_iso8601()
    }
}
