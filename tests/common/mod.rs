#![allow(dead_code)]

use budget_schedule::calendar::add_days;
use budget_schedule::CalendarDate;
use proptest::prelude::*;

pub fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).expect("valid test date")
}

/// Any date from 2000-01-01 through roughly the end of 2039.
pub fn any_date() -> impl Strategy<Value = CalendarDate> {
    dates_from(date(2000, 1, 1), 14_610)
}

pub fn dates_from(start: CalendarDate, span_days: i64) -> impl Strategy<Value = CalendarDate> {
    (0..span_days).prop_map(move |offset| add_days(start, offset))
}
