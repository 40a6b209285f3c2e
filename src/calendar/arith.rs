use chrono::{Datelike, Days, NaiveDate};

use super::CalendarDate;

/// Returns whether `year` is a leap year in the proleptic Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Shifts `date` by exactly `n` days.
pub fn add_days(date: CalendarDate, n: i64) -> CalendarDate {
    let naive = date.as_naive();
    let shifted = if n >= 0 {
        naive.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        naive.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted
        .map(CalendarDate::from_naive)
        .unwrap_or_else(|| saturate(n >= 0))
}

pub fn add_weeks(date: CalendarDate, n: i64) -> CalendarDate {
    add_days(date, n.saturating_mul(7))
}

/// Advances the month component by `n` and clamps the day to the length of the
/// resulting month: Jan 31 + 1 month is Feb 28 (Feb 29 in a leap year).
pub fn add_months_clamped(date: CalendarDate, n: i32) -> CalendarDate {
    let month_index =
        i64::from(date.year()) * 12 + i64::from(date.as_naive().month0()) + i64::from(n);
    let Ok(year) = i32::try_from(month_index.div_euclid(12)) else {
        return saturate(n >= 0);
    };
    let month = month_index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(CalendarDate::from_naive)
        .unwrap_or_else(|| saturate(n >= 0))
}

/// Advances the year component by `n`; Feb 29 becomes Feb 28 in a non-leap year.
pub fn add_years(date: CalendarDate, n: i32) -> CalendarDate {
    let Some(year) = date.year().checked_add(n) else {
        return saturate(n >= 0);
    };
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
        .map(CalendarDate::from_naive)
        .unwrap_or_else(|| saturate(n >= 0))
}

/// Months between the first of `from`'s month and the first of `to`'s month.
pub fn months_between(from: CalendarDate, to: CalendarDate) -> i64 {
    month_index(to) - month_index(from)
}

pub fn first_day_of_month(date: CalendarDate) -> CalendarDate {
    add_days(date, -i64::from(date.as_naive().day0()))
}

pub fn last_day_of_month(date: CalendarDate) -> CalendarDate {
    let remaining = days_in_month(date.year(), date.month()) - date.day();
    add_days(date, i64::from(remaining))
}

/// Sunday on or before `date`. Weeks in this crate always run Sunday to Saturday.
pub fn start_of_week(date: CalendarDate) -> CalendarDate {
    add_days(date, -i64::from(date.weekday().num_days_from_sunday()))
}

pub fn end_of_week(date: CalendarDate) -> CalendarDate {
    add_days(start_of_week(date), 6)
}

pub fn first_day_of_year(date: CalendarDate) -> CalendarDate {
    add_days(date, -i64::from(date.ordinal() - 1))
}

pub fn last_day_of_year(date: CalendarDate) -> CalendarDate {
    let remaining = days_in_year(date.year()) - date.ordinal();
    add_days(date, i64::from(remaining))
}

fn month_index(date: CalendarDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.as_naive().month0())
}

// Out-of-range results pin to the representable bound in the direction of travel.
fn saturate(forward: bool) -> CalendarDate {
    if forward {
        CalendarDate::MAX
    } else {
        CalendarDate::MIN
    }
}
