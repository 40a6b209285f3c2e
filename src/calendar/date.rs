use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ScheduleError;

/// Storage format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A proleptic Gregorian calendar date with no time of day and no time zone.
///
/// Bills and budgets are scheduled against the user's calendar, not against an
/// instant, so every computation in this crate works on this type. Values
/// serialize as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Earliest representable date.
    pub const MIN: CalendarDate = CalendarDate(NaiveDate::MIN);
    /// Latest representable date.
    pub const MAX: CalendarDate = CalendarDate(NaiveDate::MAX);

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ScheduleError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ScheduleError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Day of the year, starting at 1 for January 1st.
    pub fn ordinal(self) -> u32 {
        self.0.ordinal()
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: CalendarDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Parses a storage-layer date.
    ///
    /// Accepts a bare `YYYY-MM-DD` value as well as an ISO 8601 date-time whose
    /// date part is kept as-is (`2024-03-01T22:10:00Z` becomes `2024-03-01`).
    /// The time part must itself be well formed; anything else is `InvalidDate`.
    pub fn parse(raw: &str) -> Result<Self, ScheduleError> {
        let trimmed = raw.trim();
        let invalid = || ScheduleError::InvalidDate(raw.to_string());
        match trimmed.char_indices().nth(10) {
            None => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(Self)
                .map_err(|_| invalid()),
            Some((idx, 'T' | 't' | ' ')) => {
                let normalized = format!("{}T{}", &trimmed[..idx], &trimmed[idx + 1..]);
                date_of_date_time(&normalized).map(Self).ok_or_else(invalid)
            }
            Some(_) => Err(invalid()),
        }
    }
}

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Calendar date of an RFC 3339 timestamp (wall-clock date, offset ignored) or of
/// an offset-free date-time.
fn date_of_date_time(value: &str) -> Option<NaiveDate> {
    if let Ok(stamped) = DateTime::parse_from_rfc3339(value) {
        return Some(stamped.naive_local().date());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|stamped| stamped.date())
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CalendarDate::parse(&raw).map_err(de::Error::custom)
    }
}
