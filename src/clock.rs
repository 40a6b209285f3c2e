use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

use crate::calendar::CalendarDate;

/// Clock abstracts access to the current time so resolvers remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date. Defaults to the UTC date of `now()`.
    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(self.now().date_naive())
    }
}

/// Real-time clock reporting "today" in the machine's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive(Local::now().date_naive())
    }
}

/// Clock pinned to a single calendar date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: CalendarDate,
}

impl FixedClock {
    pub fn new(date: CalendarDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.as_naive().and_time(NaiveTime::MIN))
    }

    fn today(&self) -> CalendarDate {
        self.date
    }
}
